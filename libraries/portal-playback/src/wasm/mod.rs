//! WASM bindings for portal-playback
//!
//! Exposes the controller to the browser, backed by an `HtmlAudioElement`.
//! The host wires the element's `timeupdate`, `loadedmetadata`, `ended` and
//! `error` listeners to the matching `on*` methods, passing the id of the
//! track that was current when the listener fired.

#[cfg(feature = "wasm")]
pub mod controller;

#[cfg(feature = "wasm")]
pub mod media;

#[cfg(feature = "wasm")]
pub mod types;

#[cfg(feature = "wasm")]
pub use controller::WasmPlaybackController;

#[cfg(feature = "wasm")]
pub use media::AudioElementMedia;

#[cfg(feature = "wasm")]
pub use types::WasmTrack;
