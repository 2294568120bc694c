//=============================================================================
// File: src/screens/scan.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::{Button, ButtonType, Card};
use crate::components::qr_scanner::QrScanner;
use crate::scan::{ScanController, ScanPhase};
use crate::workbench::Workbench;

#[component]
pub fn ScanScreen() -> Element {
    let mut workbench = use_context::<Signal<Workbench>>();
    let mut controller = use_context::<Signal<ScanController>>();

    let phase = controller.read().phase().clone();

    let body = match phase {
        ScanPhase::Idle => rsx! {
            div {
                style: "text-align: center; padding: 2rem;",
                p { "Point the camera at a QR code to read it back as text." }
                Button {
                    on_click: move |_| controller.write().begin(),
                    "Start scanning"
                }
            }
        },
        ScanPhase::Scanning => rsx! {
            QrScanner {
                on_scan: move |payload: String| {
                    // The controller owns the one-shot rule; only an
                    // accepted decode becomes the scan result.
                    if controller.write().complete(payload.clone()) {
                        workbench.write().record_scan(payload);
                    }
                },
                on_error: move |message: String| controller.write().fail(message),
            }
            div {
                style: "display: flex; justify-content: center; margin-top: 1rem;",
                Button {
                    button_type: ButtonType::Secondary,
                    on_click: move |_| controller.write().cancel(),
                    "Cancel"
                }
            }
        },
        ScanPhase::Decoded(payload) => rsx! {
            div {
                style: "text-align: center; padding: 2rem;",
                p { "Scanned:" }
                code {
                    style: "word-break: break-all; font-size: 0.9rem;",
                    "{payload}"
                }
                div {
                    style: "margin-top: 1.5rem;",
                    Button {
                        button_type: ButtonType::Secondary,
                        on_click: move |_| controller.write().begin(),
                        "Scan another"
                    }
                }
            }
        },
        ScanPhase::Failed(message) => rsx! {
            div {
                style: "text-align: center; padding: 2rem;",
                p {
                    style: "color: var(--pico-color-red-500);",
                    "{message}"
                }
                Button {
                    button_type: ButtonType::Secondary,
                    on_click: move |_| controller.write().begin(),
                    "Try again"
                }
            }
        },
    };

    rsx! {
        Card {
            h2 { "Scan" }
            {body}
        }
    }
}
