//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate wires the concrete browser services: `localStorage` preferences, the streaming
//! Gemini chat transport, and camera capture. Off-browser builds compile to inert fallbacks so
//! the workspace tests run natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the host-service factory used by the entry layer.
pub mod adapters;
pub mod chat;
pub mod local_prefs;
pub mod media;

pub use adapters::{build_host_services, host_strategy_name, selected_host_strategy, HostStrategy};
pub use chat::WebGeminiChatService;
pub use local_prefs::WebPrefsStore;
