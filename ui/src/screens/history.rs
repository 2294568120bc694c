//=============================================================================
// File: src/screens/history.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::Card;
use crate::history::HistoryStore;
use crate::storage::DefaultStorage;

#[component]
pub fn HistoryScreen() -> Element {
    let history = use_context::<Signal<HistoryStore<DefaultStorage>>>();
    let codes: Vec<String> = history.read().history().codes().to_vec();

    rsx! {
        Card {
            h2 { "Saved QR codes" }
            if codes.is_empty() {
                p {
                    style: "text-align: center; padding: 2rem; color: var(--pico-muted-color);",
                    "Nothing saved yet. Generated codes show up here."
                }
            } else {
                ul {
                    style: "list-style: none; padding: 0; margin-top: 1rem;",
                    for code in codes {
                        li {
                            key: "{code}",
                            style: "padding: 0.5rem 0.75rem; margin-bottom: 0.5rem; background: var(--pico-card-sectioning-background-color); border-radius: 6px; word-break: break-all;",
                            "{code}"
                        }
                    }
                }
            }
        }
    }
}
