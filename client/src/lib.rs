//! # client
//!
//! WASM host for the gesture engine. Wires the browser's landmark
//! detector and renderer (both provided by the host page as JS
//! callbacks) to [`engine::session::SessionCore`], runs the two
//! re-armed callback loops, and fetches catalog rows over HTTP.
//!
//! The host page owns the camera, the MediaPipe-style detector, and all
//! pixel drawing; this crate owns the loop cadence and the data flowing
//! between them. Compiled with the `hydrate` feature for the browser;
//! without it only the pure helpers (catalog parsing) build, which keeps
//! them testable natively.

pub mod catalog;
#[cfg(feature = "hydrate")]
pub mod host;
