//! Item Search Component
//!
//! Name input of the add-to-list form with catalog suggestions. Picking a
//! suggestion links the row to the catalog item and fills code and price.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, SEARCH_MIN_CHARS};
use crate::context::use_app_context;
use crate::forms::ItemDraft;
use crate::models::{display_price, SearchHit};

pub const DATALIST_ID: &str = "item-datalist";

/// Suggestion whose name equals the typed text, ignoring case
pub fn match_hit<'a>(hits: &'a [SearchHit], typed: &str) -> Option<&'a SearchHit> {
    let typed = typed.trim().to_lowercase();
    if typed.is_empty() {
        return None;
    }
    hits.iter().find(|h| h.name.to_lowercase() == typed)
}

/// Copy a picked suggestion into the draft, or unlink it when nothing matches
pub fn apply_hit(draft: &mut ItemDraft, hit: Option<&SearchHit>) {
    match hit {
        Some(hit) => {
            draft.item_id = Some(hit.id);
            draft.name = hit.name.clone();
            draft.code = hit.code.clone();
            draft.price = display_price(hit.price);
        }
        None => draft.item_id = None,
    }
}

/// Latest-request-wins counter for overlapping searches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchGeneration(u64);

impl SearchGeneration {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }
}

#[component]
pub fn ItemSearch(draft: RwSignal<ItemDraft>, input_ref: NodeRef<html::Input>) -> impl IntoView {
    let ctx = use_app_context();
    let hits = RwSignal::new(Vec::<SearchHit>::new());
    let generation = StoredValue::new(SearchGeneration::default());

    let search = move |query: String| {
        let Some(current) = generation.try_update_value(|g| g.next()) else {
            return;
        };
        if query.trim().chars().count() < SEARCH_MIN_CHARS {
            hits.set(Vec::new());
            return;
        }
        spawn_local(async move {
            let url = ctx.with_config(|c| c.endpoints.item_search.clone());
            let result = commands::search_items(&ctx.api(), &url, query.trim()).await;
            if !generation.with_value(|g| g.is_current(current)) {
                log::debug!("dropping stale search results for {:?}", query);
                return;
            }
            match result {
                Ok(found) => hits.set(found),
                Err(e) => {
                    log::warn!("item search failed: {}", e);
                    hits.set(Vec::new());
                }
            }
        });
    };

    view! {
        <input
            id="item_name"
            node_ref=input_ref
            type="text"
            class="form-control"
            maxlength="200"
            autocomplete="off"
            list=DATALIST_ID
            placeholder="Item name"
            prop:value=move || draft.with(|d| d.name.clone())
            on:input=move |ev| {
                let typed = event_target_value(&ev);
                draft.update(|d| {
                    d.name = typed.clone();
                    hits.with_untracked(|h| apply_hit(d, match_hit(h, &typed)));
                });
                search(typed);
            }
        />
        <datalist id=DATALIST_ID>
            <For
                each=move || hits.get()
                key=|hit| hit.id
                children=move |hit: SearchHit| view! { <option value=hit.name.clone()>{hit.code}</option> }
            />
        </datalist>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> Vec<SearchHit> {
        vec![
            SearchHit { id: 1, name: "Milk".into(), code: "M1".into(), price: Some(1.2) },
            SearchHit { id: 2, name: "Milk chocolate".into(), code: String::new(), price: None },
        ]
    }

    #[test]
    fn test_match_hit_is_exact_ignoring_case() {
        let hits = hits();
        assert_eq!(match_hit(&hits, " milk ").map(|h| h.id), Some(1));
        assert_eq!(match_hit(&hits, "MILK CHOCOLATE").map(|h| h.id), Some(2));
        assert!(match_hit(&hits, "mil").is_none());
        assert!(match_hit(&hits, "").is_none());
    }

    #[test]
    fn test_apply_hit_fills_and_unlinks() {
        let hits = hits();
        let mut draft = ItemDraft::default();
        apply_hit(&mut draft, hits.first());
        assert_eq!(draft.item_id, Some(1));
        assert_eq!(draft.code, "M1");
        assert_eq!(draft.price, "1.2");

        apply_hit(&mut draft, None);
        assert_eq!(draft.item_id, None);
        assert_eq!(draft.code, "M1");
    }

    #[test]
    fn test_only_latest_generation_is_current() {
        let mut generation = SearchGeneration::default();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
