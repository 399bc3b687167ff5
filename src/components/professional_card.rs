//! Listing card for one professional on the home page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::ProfessionalCard as CardData;
use crate::util::format::{display_title, format_location, format_price_brl, format_rating};

const AVATAR_FALLBACK: &str = "/img/avatar-fallback.png";

#[component]
pub fn ProfessionalCard(card: CardData) -> impl IntoView {
    let href = format!("/p/{}", card.id);
    let title = display_title(&card);
    let location = format_location(&card);
    let rating = format_rating(card.rating);
    let price = format!("{} • {} min", format_price_brl(card.price_cents), card.session_minutes);
    let avatar = card.avatar_url.clone().unwrap_or_else(|| AVATAR_FALLBACK.to_owned());
    let modalities = card.modalities.clone();

    view! {
        <A href=href attr:class="pro-card">
            <img class="pro-card__avatar" src=avatar alt=card.full_name.clone()/>
            <div class="pro-card__body">
                <h3 class="pro-card__title">{title}</h3>
                {(!location.is_empty()).then(|| view! { <p class="pro-card__location">{location}</p> })}
                <div class="pro-card__tags">
                    {modalities
                        .into_iter()
                        .map(|m| view! { <span class="pro-card__tag">{m}</span> })
                        .collect_view()}
                    {rating.map(|r| view! { <span class="pro-card__rating">{r}</span> })}
                </div>
                <p class="pro-card__price">{price}</p>
            </div>
        </A>
    }
}
