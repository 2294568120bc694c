//=============================================================================
// File: src/components/qr_code.rs
//=============================================================================
use dioxus::prelude::*;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

#[derive(Props, Clone, PartialEq)]
pub struct QrImageProps {
    pub data: String,
    #[props(optional)]
    pub caption: Option<String>,
}

/// Renders a payload as an SVG QR image with a fixed logo badge over the
/// center. Error correction is pinned at level H so the symbol stays
/// scannable despite the modules hidden by the badge.
#[allow(non_snake_case)]
pub fn QrImage(props: QrImageProps) -> Element {
    match QrCode::with_error_correction_level(props.data.as_bytes(), EcLevel::H) {
        Ok(code) => {
            let image = code
                .render::<svg::Color>()
                .min_dimensions(220, 220)
                .build();

            rsx! {
                figure {
                    style: "margin: 0; text-align: center;",
                    div {
                        style: "position: relative; display: inline-block; line-height: 0;",
                        title: "{props.data}",
                        div { dangerous_inner_html: "{image}" }
                        // The badge covers well under the ~30% damage that
                        // level H tolerates.
                        div {
                            style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); width: 18%; height: 18%; background: #fff; border-radius: 50%; display: flex; align-items: center; justify-content: center;",
                            svg {
                                view_box: "0 0 24 24",
                                width: "62%",
                                height: "62%",
                                fill: "#000",
                                rect { x: "3", y: "3", width: "8", height: "8", rx: "1" }
                                rect { x: "13", y: "3", width: "8", height: "8", rx: "1" }
                                rect { x: "3", y: "13", width: "8", height: "8", rx: "1" }
                                rect { x: "15", y: "15", width: "4", height: "4", rx: "1" }
                            }
                        }
                    }
                    if let Some(caption_text) = &props.caption {
                        figcaption {
                            style: "text-align: center; font-size: 14px; margin-top: 8px;",
                            "{caption_text}"
                        }
                    }
                }
            }
        }
        Err(e) => rsx! {
            p {
                style: "color: red; font-family: sans-serif; font-size: 14px; border: 1px solid red; padding: 10px; border-radius: 5px;",
                "Error generating QR code: {e}"
            }
        },
    }
}
