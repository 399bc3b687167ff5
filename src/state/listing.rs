//! Professional listing state for the home page.
//!
//! DESIGN
//! ======
//! Filter changes can fire several listing requests back to back. Each
//! request takes a [`Ticket`] when it is issued and its response is applied
//! only if no newer request was issued since, so results never go backwards.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use crate::net::api;
use crate::net::http::{ApiClient, ApiError, Transport};
use crate::net::types::{Modality, Profession, ProfessionalCard, ProfessionalQuery};
use crate::util::scope::{LatestRequest, Ticket};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingState {
    pub items: Vec<ProfessionalCard>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ListingState {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a response; on failure the previous items stay visible.
    pub fn finish(&mut self, result: Result<Vec<ProfessionalCard>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Raw filter form values, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub profession: String,
    pub city: String,
    pub modality: String,
    pub q: String,
    /// Reais, free text (`"150"`, `"99,90"`).
    pub price_min: String,
    pub price_max: String,
}

impl ListingFilters {
    pub fn to_query(&self) -> ProfessionalQuery {
        ProfessionalQuery {
            profession: Profession::parse(self.profession.trim()),
            city: Some(self.city.trim().to_owned()).filter(|v| !v.is_empty()),
            modality: Modality::parse(self.modality.trim()),
            price_min: parse_reais(&self.price_min),
            price_max: parse_reais(&self.price_max),
            q: Some(self.q.trim().to_owned()).filter(|v| !v.is_empty()),
        }
    }
}

/// Reais as typed → centavos. Blank or invalid → `None`.
///
/// Accepts pt-BR grouping (`"1.000,00"`, `"1.000"`) as well as a plain
/// decimal point (`"99.9"`). A `.` followed only by 3-digit groups is a
/// thousands separator.
pub fn parse_reais(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (whole, frac) = match raw.rsplit_once(',') {
        Some(parts) => parts,
        None if is_grouped(raw) => (raw, ""),
        None => raw.split_once('.').unwrap_or((raw, "")),
    };
    let whole = if whole.contains('.') {
        if !is_grouped(whole) {
            return None;
        }
        whole.replace('.', "")
    } else {
        whole.to_owned()
    };
    if frac.len() > 2 || !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

/// `1.000` / `12.345.678`: a 1-3 digit head, then `.`-separated 3-digit groups.
fn is_grouped(raw: &str) -> bool {
    let mut groups = raw.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|head| (1..=3).contains(&head.len()) && head.chars().all(|c| c.is_ascii_digit()));
    let mut tail = groups.peekable();
    head_ok && tail.peek().is_some() && tail.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// Latest-wins loader around `GET /professionals`.
#[derive(Clone, Debug, Default)]
pub struct ListingLoader {
    latest: LatestRequest,
}

impl ListingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket; do this synchronously when the filters change.
    pub fn issue(&self) -> Ticket {
        self.latest.issue()
    }

    /// Fetch for `ticket`. `None` means a newer request superseded this one.
    pub async fn fetch<T: Transport>(
        &self,
        ticket: Ticket,
        client: &ApiClient<T>,
        query: &ProfessionalQuery,
    ) -> Option<Result<Vec<ProfessionalCard>, ApiError>> {
        let result = api::list_professionals(client, query).await.map(|list| list.items);
        if self.latest.is_latest(ticket) {
            Some(result)
        } else {
            log::debug!("listing: discarding superseded response");
            None
        }
    }
}
