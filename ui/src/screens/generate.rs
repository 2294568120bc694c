//=============================================================================
// File: src/screens/generate.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::{Button, Card};
use crate::components::qr_code::QrImage;
use crate::history::HistoryStore;
use crate::storage::DefaultStorage;
use crate::workbench::Workbench;

#[component]
pub fn GenerateScreen() -> Element {
    let mut workbench = use_context::<Signal<Workbench>>();
    let mut history = use_context::<Signal<HistoryStore<DefaultStorage>>>();

    // Pre-build the conditional QR display to keep the main rsx! simple.
    let qr_display: Option<Element> = workbench.read().generated().map(|payload| {
        rsx! {
            div {
                style: "display: flex; justify-content: center; margin-top: 1.5rem;",
                QrImage {
                    data: payload.to_string(),
                    caption: "Scan with any QR reader.".to_string(),
                }
            }
        }
    });

    let draft = workbench.read().text().to_string();

    rsx! {
        Card {
            h2 { "Generate" }
            input {
                r#type: "text",
                placeholder: "Enter text for QR code",
                value: "{draft}",
                oninput: move |evt| workbench.write().set_text(evt.value()),
            }
            Button {
                on_click: move |_| {
                    let mut history = history.write();
                    workbench.write().generate(&mut history);
                },
                "Generate QR code"
            }

            {qr_display}
        }
    }
}
