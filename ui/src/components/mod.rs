//! Shared components: Pico.css widget wrappers, the QR image renderer, and
//! the camera-backed scanner.

pub mod pico;
pub mod qr_code;
pub mod qr_scanner;
