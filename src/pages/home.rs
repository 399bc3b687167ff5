//! Home page: filterable grid of professionals.
//!
//! Every filter edit re-queries the listing. Requests can overlap while the
//! user types; [`ListingLoader`] drops any response that is not the newest.

use leptos::prelude::*;

use crate::components::professional_card::ProfessionalCard;
use crate::state::listing::{ListingFilters, ListingLoader, ListingState};
use crate::state::session::use_session;
use crate::util::scope::ViewScope;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let loader = ListingLoader::new();

    let filters = RwSignal::new(ListingFilters::default());
    let listing = RwSignal::new(ListingState::default());

    Effect::new(move || {
        let query = filters.with(ListingFilters::to_query);
        let ticket = loader.issue();
        listing.update(ListingState::start);
        let session = session.clone();
        let loader = loader.clone();
        scope.spawn(async move {
            if let Some(result) = loader.fetch(ticket, session.client(), &query).await {
                listing.update(|s| s.finish(result));
            }
        });
    });

    view! {
        <div class="home">
            <h1>"Encontre um profissional"</h1>
            <form class="filters" on:submit=|ev: leptos::ev::SubmitEvent| ev.prevent_default()>
                <label class="filters__field">
                    <span>"Profissão"</span>
                    <select
                        prop:value=move || filters.with(|f| f.profession.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            filters.update(|f| f.profession = value);
                        }
                    >
                        <option value="">"Todas"</option>
                        <option value="psychology">"Psicologia"</option>
                        <option value="nutrition">"Nutrição"</option>
                    </select>
                </label>
                <label class="filters__field">
                    <span>"Modalidade"</span>
                    <select
                        prop:value=move || filters.with(|f| f.modality.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            filters.update(|f| f.modality = value);
                        }
                    >
                        <option value="">"Todas"</option>
                        <option value="online">"Online"</option>
                        <option value="presencial">"Presencial"</option>
                    </select>
                </label>
                {filter_input(filters, "Cidade", "Ex.: Recife", |f| &mut f.city)}
                {filter_input(filters, "Busca", "Nome ou especialidade", |f| &mut f.q)}
                {filter_input(filters, "Preço mínimo (R$)", "0", |f| &mut f.price_min)}
                {filter_input(filters, "Preço máximo (R$)", "500", |f| &mut f.price_max)}
            </form>
            {move || listing.with(|s| s.error.clone()).map(|msg| view! { <p class="page-error">{msg}</p> })}
            <Show when=move || listing.with(|s| s.loading)>
                <p class="page-status">"Carregando…"</p>
            </Show>
            <Show when=move || listing.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                <p class="page-status">"Nenhum profissional encontrado."</p>
            </Show>
            <div class="pro-grid">
                <For
                    each=move || listing.with(|s| s.items.clone())
                    key=|card| card.id
                    children=|card| view! { <ProfessionalCard card=card/> }
                />
            </div>
        </div>
    }
}

fn filter_input(
    filters: RwSignal<ListingFilters>,
    label: &'static str,
    placeholder: &'static str,
    field: fn(&mut ListingFilters) -> &mut String,
) -> impl IntoView {
    view! {
        <label class="filters__field">
            <span>{label}</span>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || {
                    let mut current = filters.get();
                    std::mem::take(field(&mut current))
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| *field(f) = value);
                }
            />
        </label>
    }
}
