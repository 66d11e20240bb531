//! Chat-completion contracts for the assistant app and the Gemini streaming wire format.
//!
//! Transport lives in `platform_host_web`; this module owns the request body shape, the
//! server-sent-event framing, and the chunk decoding so they can be tested off-browser.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use futures::stream::{self, LocalBoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Model used for assistant replies.
pub const ASSISTANT_MODEL: &str = "gemini-2.5-flash";

/// System instruction sent with every assistant conversation.
pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are Nebula AI, a helpful, witty, and concise AI assistant embedded within the NebulaOS web operating system. You help users with coding, writing, and general knowledge.";

/// Base URL of the generative language REST API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Author of one conversation turn.
pub enum ChatRole {
    /// The human user.
    User,
    /// The model.
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One message in an assistant conversation.
pub struct ChatTurn {
    /// Author of the turn.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
}

impl ChatTurn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// Creates a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures surfaced by a [`ChatStreamService`].
pub enum ChatError {
    /// No API key was configured at build time.
    #[error("assistant API key is not configured")]
    MissingApiKey,
    /// The request could not be sent or the connection dropped.
    #[error("assistant transport failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("assistant endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// A streamed event could not be decoded.
    #[error("assistant response could not be decoded: {0}")]
    Decode(String),
    /// The active host has no chat transport.
    #[error("assistant transport is unavailable on this host")]
    Unavailable,
}

/// Stream of reply text fragments, in arrival order.
pub type ChatStream = LocalBoxStream<'static, Result<String, ChatError>>;

/// Host service that streams a model reply for a prompt and prior history.
pub trait ChatStreamService {
    /// Starts a reply for `prompt`, with `history` holding every earlier turn.
    fn stream_reply(&self, history: Vec<ChatTurn>, prompt: String) -> ChatStream;
}

#[derive(Debug, Clone, Copy, Default)]
/// Chat service for hosts without a transport; every request fails with [`ChatError::Unavailable`].
pub struct NoopChatStreamService;

impl ChatStreamService for NoopChatStreamService {
    fn stream_reply(&self, _history: Vec<ChatTurn>, _prompt: String) -> ChatStream {
        stream::once(async { Err(ChatError::Unavailable) }).boxed_local()
    }
}

/// Chat service that replays queued replies. Each call consumes one script entry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChatStreamService {
    replies: Rc<RefCell<VecDeque<Vec<Result<String, ChatError>>>>>,
    requests: Rc<RefCell<Vec<(Vec<ChatTurn>, String)>>>,
}

impl ScriptedChatStreamService {
    /// Queues one reply made of `chunks`.
    pub fn push_reply(&self, chunks: Vec<Result<String, ChatError>>) {
        self.replies.borrow_mut().push_back(chunks);
    }

    /// Returns every `(history, prompt)` pair seen so far.
    pub fn requests(&self) -> Vec<(Vec<ChatTurn>, String)> {
        self.requests.borrow().clone()
    }
}

impl ChatStreamService for ScriptedChatStreamService {
    fn stream_reply(&self, history: Vec<ChatTurn>, prompt: String) -> ChatStream {
        self.requests.borrow_mut().push((history, prompt));
        let chunks = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| vec![Err(ChatError::Unavailable)]);
        stream::iter(chunks).boxed_local()
    }
}

/// Returns the streaming endpoint URL for `model`.
pub fn stream_endpoint_url(model: &str) -> String {
    format!("{GEMINI_API_BASE_URL}/models/{model}:streamGenerateContent?alt=sse")
}

/// Builds the JSON request body for a streamed reply.
///
/// `history` becomes the leading `contents` entries and `prompt` the final user entry.
pub fn build_stream_request_body(history: &[ChatTurn], prompt: &str) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            json!({
                "role": turn.role,
                "parts": [{ "text": turn.text }],
            })
        })
        .collect();
    contents.push(json!({
        "role": ChatRole::User,
        "parts": [{ "text": prompt }],
    }));

    json!({
        "systemInstruction": { "parts": [{ "text": ASSISTANT_SYSTEM_INSTRUCTION }] },
        "contents": contents,
    })
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<StreamCandidate>,
}

#[derive(Debug, Deserialize)]
struct StreamCandidate {
    content: Option<StreamContent>,
}

#[derive(Debug, Deserialize)]
struct StreamContent {
    #[serde(default)]
    parts: Vec<StreamPart>,
}

#[derive(Debug, Deserialize)]
struct StreamPart {
    text: Option<String>,
}

/// Extracts reply text from one streamed `data:` payload.
///
/// Payloads without text (for example safety or usage metadata) decode to an empty string.
///
/// # Errors
///
/// Returns [`ChatError::Decode`] when the payload is not a response chunk.
pub fn decode_stream_chunk(payload: &str) -> Result<String, ChatError> {
    let chunk: StreamChunk =
        serde_json::from_str(payload).map_err(|err| ChatError::Decode(err.to_string()))?;
    Ok(chunk
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

/// Incremental server-sent-event decoder.
///
/// Bytes may arrive split at arbitrary positions, including inside a UTF-8 sequence; only
/// complete events are returned.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Appends `bytes` and returns the `data` payload of every event completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut events = Vec::new();
        while let Some((end, delimiter_len)) = find_event_boundary(&self.buffer) {
            let raw: Vec<u8> = self.buffer.drain(..end + delimiter_len).take(end).collect();
            if let Some(data) = event_data(&String::from_utf8_lossy(&raw)) {
                events.push(data);
            }
        }
        events
    }

    /// Returns the payload of a trailing event left without a terminating blank line.
    pub fn finish(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.buffer);
        event_data(&String::from_utf8_lossy(&raw))
    }
}

fn find_event_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buffer
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn event_data(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn request_body_places_history_before_prompt() {
        let history = vec![
            ChatTurn::model("Hello! I am Nebula AI."),
            ChatTurn::user("What is Rust?"),
            ChatTurn::model("A systems language."),
        ];
        let body = build_stream_request_body(&history, "Tell me more");

        let contents = body["contents"].as_array().expect("contents array");
        assert_eq!(contents.len(), 4);
        assert_eq!(contents[0]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "What is Rust?");
        assert_eq!(contents[3]["role"], "user");
        assert_eq!(contents[3]["parts"][0]["text"], "Tell me more");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            ASSISTANT_SYSTEM_INSTRUCTION
        );
    }

    #[test]
    fn endpoint_targets_sse_streaming() {
        assert_eq!(
            stream_endpoint_url(ASSISTANT_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn decoder_yields_events_split_across_pushes() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"data: {\"a\":").is_empty());
        assert_eq!(decoder.push(b"1}\n\ndata: {\"b\":2}\r\n\r\n"), vec![
            "{\"a\":1}".to_string(),
            "{\"b\":2}".to_string()
        ]);
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn decoder_keeps_multibyte_characters_split_between_chunks() {
        let payload = "data: {\"t\":\"caf\u{e9}\"}\n\n".as_bytes();
        let split = payload.iter().position(|b| *b == 0xc3).expect("utf-8 lead byte") + 1;
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(&payload[..split]).is_empty());
        assert_eq!(
            decoder.push(&payload[split..]),
            vec!["{\"t\":\"caf\u{e9}\"}".to_string()]
        );
    }

    #[test]
    fn decoder_ignores_comment_only_events_and_flushes_trailing_data() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b": keep-alive\n\n").is_empty());
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
    }

    #[test]
    fn chunk_text_concatenates_parts_of_first_candidate() {
        let payload = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"},{"text":"lo"}]}}]}"#;
        assert_eq!(decode_stream_chunk(payload), Ok("Hello".to_string()));
    }

    #[test]
    fn chunk_without_text_is_empty_and_garbage_is_a_decode_error() {
        assert_eq!(
            decode_stream_chunk(r#"{"usageMetadata":{"totalTokenCount":3}}"#),
            Ok(String::new())
        );
        assert!(matches!(
            decode_stream_chunk("not json"),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn scripted_service_replays_queued_replies_and_records_requests() {
        let service = ScriptedChatStreamService::default();
        service.push_reply(vec![Ok("Hi".to_string()), Ok(" there".to_string())]);

        let chunks: Vec<_> = block_on(
            service
                .stream_reply(vec![ChatTurn::model("greeting")], "hello".to_string())
                .collect::<Vec<_>>(),
        );
        assert_eq!(chunks, vec![Ok("Hi".to_string()), Ok(" there".to_string())]);
        assert_eq!(service.requests().len(), 1);
        assert_eq!(service.requests()[0].1, "hello");

        let exhausted: Vec<_> =
            block_on(service.stream_reply(Vec::new(), "again".to_string()).collect::<Vec<_>>());
        assert_eq!(exhausted, vec![Err(ChatError::Unavailable)]);
    }
}
