//! Typed host-service contracts shared by the desktop runtime, hosted apps, and browser adapters.
//!
//! This crate owns no browser bindings. It defines the storage and chat-stream service traits,
//! in-memory doubles for tests and non-browser targets, and the Gemini streaming wire helpers.
//! Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod assistant;
pub mod host;
pub mod prefs;
pub mod time;

pub use assistant::{
    build_stream_request_body, decode_stream_chunk, stream_endpoint_url, ChatError, ChatRole,
    ChatStream, ChatStreamService, ChatTurn, NoopChatStreamService, ScriptedChatStreamService,
    SseDecoder, ASSISTANT_MODEL, ASSISTANT_SYSTEM_INSTRUCTION, GEMINI_API_BASE_URL,
};
pub use host::HostServices;
pub use prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture};
pub use time::ClockSnapshot;
