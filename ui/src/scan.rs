//! Scan sessions: the state machine driving the camera UI, plus the pure
//! per-frame decode pipeline it feeds on.
//!
//! The camera and the frame-sampling timer live in the scanner component;
//! everything here is plain data and runs on any target, so the session
//! semantics are unit-testable without a browser.

use dioxus_logger::tracing::{debug, info, trace, warn};
use image::GrayImage;
use thiserror::Error;

/// Milliseconds between frame samples (10 fps).
pub const SCAN_INTERVAL_MS: u32 = 100;

/// Side length of the centered square detection window, in pixels. Frames
/// smaller than this are used whole.
pub const DETECT_BOX_PX: u32 = 250;

/// Where a scan session currently stands.
///
/// `Decoded` and `Failed` are terminal for the session; a new session starts
/// with [`ScanController::begin`] regardless of prior results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    Decoded(String),
    Failed(String),
}

/// One-shot scan session controller.
///
/// Per-frame misses keep the session alive; the first successful decode ends
/// it, and anything delivered after that is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanController {
    phase: ScanPhase,
}

impl ScanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Scanning
    }

    /// Starts a fresh session. A no-op while one is already running.
    pub fn begin(&mut self) {
        if self.is_scanning() {
            return;
        }
        self.phase = ScanPhase::Scanning;
    }

    /// Tears the session down without a result.
    pub fn cancel(&mut self) {
        if self.is_scanning() {
            self.phase = ScanPhase::Idle;
        }
    }

    /// Camera acquisition failed; the session ends in a visible error state.
    pub fn fail(&mut self, message: String) {
        if self.is_scanning() {
            warn!("scan session failed: {message}");
            self.phase = ScanPhase::Failed(message);
        }
    }

    /// A sampled frame held no decodable QR code. Expected and frequent; the
    /// session keeps sampling.
    pub fn frame_missed(&mut self, miss: &FrameMiss) {
        if self.is_scanning() {
            trace!("frame without a usable QR code: {miss}");
        }
    }

    /// Delivers a decoded payload. Returns `true` if this session accepted
    /// it, `false` if the session had already ended.
    pub fn complete(&mut self, payload: String) -> bool {
        if !self.is_scanning() {
            debug!("decode delivered after session teardown, dropping");
            return false;
        }
        info!("scan session decoded a payload ({} bytes)", payload.len());
        self.phase = ScanPhase::Decoded(payload);
        true
    }
}

/// Why a sampled frame produced no payload.
#[derive(Debug, Error)]
pub enum FrameMiss {
    #[error("no QR pattern in frame")]
    NoCode,
    #[error("QR pattern found but not decodable: {0}")]
    Undecodable(rqrr::DeQRError),
    #[error("decoded payload was empty")]
    EmptyPayload,
}

/// Collapses an RGBA pixel buffer (as delivered by a canvas 2d context) to
/// 8-bit luma using the usual BT.601 weights.
pub fn luma_from_rgba(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|pixel| {
            (pixel[0] as f32 * 0.299 + pixel[1] as f32 * 0.587 + pixel[2] as f32 * 0.114) as u8
        })
        .collect()
}

/// Attempts to decode a QR payload from one camera frame.
///
/// The frame is cropped to the centered detection window, contrast-stretched
/// when the luma range is narrow (dim rooms, washed-out screens), then fed
/// through rqrr. Only the first detected grid is considered.
pub fn decode_frame(frame: GrayImage) -> Result<String, FrameMiss> {
    let mut window = detection_window(frame);
    stretch_contrast(&mut window);

    let mut prepared = rqrr::PreparedImage::prepare(window);
    let grids = prepared.detect_grids();
    let grid = grids.first().ok_or(FrameMiss::NoCode)?;

    let (_meta, content) = grid.decode().map_err(FrameMiss::Undecodable)?;
    if content.is_empty() {
        return Err(FrameMiss::EmptyPayload);
    }
    Ok(content)
}

/// Crops the frame to a centered square of at most [`DETECT_BOX_PX`].
fn detection_window(frame: GrayImage) -> GrayImage {
    let (width, height) = frame.dimensions();
    let side = DETECT_BOX_PX.min(width).min(height);
    if side == width && side == height {
        return frame;
    }
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    image::imageops::crop_imm(&frame, x, y, side, side).to_image()
}

/// Stretches low-contrast frames to the full 0-255 range. Frames that
/// already span most of the range are left untouched.
fn stretch_contrast(frame: &mut GrayImage) {
    let mut min_luma = u8::MAX;
    let mut max_luma = u8::MIN;
    for pixel in frame.iter() {
        min_luma = min_luma.min(*pixel);
        max_luma = max_luma.max(*pixel);
    }

    let range = max_luma.saturating_sub(min_luma);
    if range == 0 || range >= 200 {
        return;
    }

    let scale = 255.0 / range as f32;
    for pixel in frame.iter_mut() {
        *pixel = ((*pixel as f32 - min_luma as f32) * scale).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Paints `payload` as a QR symbol into a grayscale frame, with a quiet
    /// zone, at the given dark/light luma levels.
    fn synthetic_frame(payload: &str, dark: u8, light: u8) -> GrayImage {
        const SCALE: usize = 8;
        const QUIET_MODULES: usize = 4;

        let code =
            qrcode::QrCode::with_error_correction_level(payload.as_bytes(), qrcode::EcLevel::H)
                .unwrap();
        let modules = code.to_colors();
        let width = code.width();

        let side = ((width + 2 * QUIET_MODULES) * SCALE) as u32;
        let mut frame = GrayImage::from_pixel(side, side, Luma([light]));
        for (index, module) in modules.iter().enumerate() {
            if *module != qrcode::Color::Dark {
                continue;
            }
            let module_x = (QUIET_MODULES + index % width) * SCALE;
            let module_y = (QUIET_MODULES + index / width) * SCALE;
            for dy in 0..SCALE {
                for dx in 0..SCALE {
                    frame.put_pixel((module_x + dx) as u32, (module_y + dy) as u32, Luma([dark]));
                }
            }
        }
        frame
    }

    #[test]
    fn session_is_one_shot() {
        let mut controller = ScanController::new();
        controller.begin();
        assert!(controller.is_scanning());

        controller.frame_missed(&FrameMiss::NoCode);
        controller.frame_missed(&FrameMiss::EmptyPayload);
        assert!(controller.is_scanning());

        assert!(controller.complete("payload-X".into()));
        assert_eq!(controller.phase(), &ScanPhase::Decoded("payload-X".into()));

        // The session has been torn down; a straggling decode is dropped.
        assert!(!controller.complete("payload-Y".into()));
        assert_eq!(controller.phase(), &ScanPhase::Decoded("payload-X".into()));
    }

    #[test]
    fn begin_after_a_terminal_phase_starts_a_fresh_session() {
        let mut controller = ScanController::new();
        controller.begin();
        controller.complete("done".into());

        controller.begin();
        assert!(controller.is_scanning());
        assert!(controller.complete("again".into()));
    }

    #[test]
    fn cancel_returns_a_running_session_to_idle() {
        let mut controller = ScanController::new();
        controller.begin();
        controller.cancel();
        assert_eq!(controller.phase(), &ScanPhase::Idle);

        // Cancel outside a session does not disturb a prior result.
        controller.begin();
        controller.complete("kept".into());
        controller.cancel();
        assert_eq!(controller.phase(), &ScanPhase::Decoded("kept".into()));
    }

    #[test]
    fn camera_failure_surfaces_as_a_failed_phase() {
        let mut controller = ScanController::new();
        controller.begin();
        controller.fail("permission denied".into());
        assert_eq!(
            controller.phase(),
            &ScanPhase::Failed("permission denied".into())
        );
        assert!(!controller.complete("too late".into()));
    }

    #[test]
    fn decode_frame_reads_a_clean_symbol() {
        let frame = synthetic_frame("scan-me", 0, 255);
        assert_eq!(decode_frame(frame).unwrap(), "scan-me");
    }

    #[test]
    fn decode_frame_recovers_a_low_contrast_symbol() {
        // A luma range of 40 forces the contrast-stretch path.
        let frame = synthetic_frame("dim light", 100, 140);
        assert_eq!(decode_frame(frame).unwrap(), "dim light");
    }

    #[test]
    fn decode_frame_reports_a_blank_frame_as_a_miss() {
        let frame = GrayImage::from_pixel(300, 300, Luma([255]));
        assert!(matches!(decode_frame(frame), Err(FrameMiss::NoCode)));
    }

    #[test]
    fn detection_window_crops_large_frames_to_the_center() {
        let frame = GrayImage::from_pixel(640, 480, Luma([255]));
        let window = detection_window(frame);
        assert_eq!(window.dimensions(), (DETECT_BOX_PX, DETECT_BOX_PX));

        let small = GrayImage::from_pixel(120, 120, Luma([255]));
        assert_eq!(detection_window(small).dimensions(), (120, 120));
    }

    #[test]
    fn luma_conversion_weighs_channels_unevenly() {
        let rgba = [255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];
        let luma = luma_from_rgba(&rgba);
        assert_eq!(luma, vec![76, 149, 29]);
    }
}
