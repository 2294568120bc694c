//=============================================================================
// File: src/components/qr_scanner.rs
//=============================================================================

// Conditionally export the correct module based on the target architecture,
// so callers can simply `use qr_scanner::QrScanner` without worrying about
// the platform.
#[cfg(target_arch = "wasm32")]
pub use self::wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use self::non_wasm32::*;

/// The camera-backed scanner for the WebAssembly target.
#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use dioxus::prelude::*;
    use dioxus_logger::tracing::trace;
    use gloo_timers::callback::Interval;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
        MediaStreamConstraints,
    };

    use crate::scan::{decode_frame, luma_from_rgba, DETECT_BOX_PX, SCAN_INTERVAL_MS};

    /// Runs one decode session against the default camera.
    ///
    /// The session samples a frame every [`SCAN_INTERVAL_MS`] and is
    /// one-shot: the first decoded payload is delivered through `on_scan`
    /// and the camera is released immediately. A camera that cannot be
    /// acquired is reported once through `on_error`. Unmounting the
    /// component releases the camera as well, so cancelling or navigating
    /// away never leaves the device busy.
    #[component]
    pub fn QrScanner(on_scan: EventHandler<String>, on_error: EventHandler<String>) -> Element {
        let mut video_stream = use_signal::<Option<MediaStream>>(|| None);
        let mut interval_handle = use_signal::<Option<Interval>>(|| None);
        let mut done = use_signal(|| false);

        // Acquire the camera once and attach it to the video element.
        use_resource(move || async move {
            match acquire_camera().await {
                Ok(stream) => {
                    if let Some(video) = get_element_by_id::<HtmlVideoElement>("qr-video") {
                        video.set_src_object(Some(&stream));
                    }
                    video_stream.set(Some(stream));
                }
                Err(e) => {
                    on_error.call(format!("Failed to start camera: {e:?}"));
                }
            }
        });

        // Sampled on every interval tick while the session runs.
        let scan_frame = move || {
            if done() {
                return;
            }

            let video: Option<HtmlVideoElement> = get_element_by_id("qr-video");
            let canvas: Option<HtmlCanvasElement> = get_element_by_id("qr-canvas");
            let (Some(video), Some(canvas)) = (video, canvas) else {
                return;
            };

            let width = video.video_width();
            let height = video.video_height();
            if width == 0 || height == 0 {
                return; // Video not ready yet.
            }

            canvas.set_width(width);
            canvas.set_height(height);

            let Ok(Some(ctx)) = canvas.get_context("2d") else {
                return;
            };
            let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
                return;
            };
            if ctx
                .draw_image_with_html_video_element(&video, 0.0, 0.0)
                .is_err()
            {
                return;
            }
            let Ok(image_data) = ctx.get_image_data(0.0, 0.0, width as f64, height as f64) else {
                return;
            };

            let luma = luma_from_rgba(&image_data.data().0);
            let Some(frame) = image::GrayImage::from_raw(width, height, luma) else {
                return;
            };

            match decode_frame(frame) {
                Ok(payload) => {
                    // First decode wins; tear the session down before
                    // reporting so no second tick can fire.
                    done.set(true);
                    interval_handle.take();
                    if let Some(stream) = video_stream.take() {
                        stop_tracks(&stream);
                    }
                    on_scan.call(payload);
                }
                Err(miss) => trace!("scan frame miss: {miss}"),
            }
        };

        use_drop(move || {
            interval_handle.take();
            if let Some(stream) = video_stream.take() {
                stop_tracks(&stream);
            }
        });

        rsx! {
            div {
                style: "position: relative; width: 100%; max-width: 400px; margin: auto; border-radius: 8px; overflow: hidden; border: 1px solid var(--pico-form-element-border-color);",
                video {
                    id: "qr-video",
                    style: "width: 100%; display: block;",
                    autoplay: true,
                    playsinline: true,
                    oncanplay: move |_| {
                        if interval_handle.peek().is_none() {
                            interval_handle.set(Some(Interval::new(SCAN_INTERVAL_MS, scan_frame)));
                        }
                    },
                }
                // Aiming guide matching the centered detection window.
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); width: {DETECT_BOX_PX}px; height: {DETECT_BOX_PX}px; max-width: 85%; max-height: 85%; border: 2px solid rgba(255, 255, 255, 0.8); border-radius: 8px; pointer-events: none;",
                }
                canvas { id: "qr-canvas", style: "display: none;" }
            }
        }
    }

    /// A private helper to fetch a DOM element by id. Web-only concept, so
    /// it lives in the wasm32 module.
    fn get_element_by_id<T: wasm_bindgen::JsCast>(id: &str) -> Option<T> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<T>().ok())
    }

    async fn acquire_camera() -> Result<MediaStream, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let media_devices = window.navigator().media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::from(true));
        constraints.set_audio(&JsValue::from(false));

        let promise = media_devices.get_user_media_with_constraints(&constraints)?;
        let stream = JsFuture::from(promise).await?;
        Ok(MediaStream::from(stream))
    }

    fn stop_tracks(stream: &MediaStream) {
        stream
            .get_tracks()
            .for_each(&mut |track, _, _| web_sys::MediaStreamTrack::from(track).stop());
    }
}

/// Placeholder for native (non-WASM) targets, where no camera pipeline is
/// wired up.
#[cfg(not(target_arch = "wasm32"))]
mod non_wasm32 {
    use dioxus::prelude::*;

    #[component]
    pub fn QrScanner(on_scan: EventHandler<String>, on_error: EventHandler<String>) -> Element {
        // Keep the props named so the component keeps the same public API
        // as the wasm32 build.
        let _ = (on_scan, on_error);

        rsx! {
            p { "Camera scanning is only available in the browser build." }
        }
    }
}
