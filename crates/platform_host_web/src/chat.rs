//! Gemini streaming chat transport over `window.fetch`.
//!
//! The response body is read incrementally through a `ReadableStreamDefaultReader`; each chunk is
//! fed to [`platform_host::SseDecoder`] and every decoded text fragment is forwarded as soon as it
//! arrives.

use futures::stream::{self, StreamExt};
use platform_host::{ChatError, ChatStream, ChatStreamService, ChatTurn, ASSISTANT_MODEL};

/// API key captured from the build environment.
pub const BUILD_API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

#[derive(Debug, Clone, Copy)]
/// Chat service calling the Gemini streaming endpoint from the browser.
pub struct WebGeminiChatService {
    api_key: Option<&'static str>,
    model: &'static str,
}

impl Default for WebGeminiChatService {
    fn default() -> Self {
        Self::new(BUILD_API_KEY)
    }
}

impl WebGeminiChatService {
    /// Creates a service for the default assistant model.
    ///
    /// An empty key is treated as missing.
    pub fn new(api_key: Option<&'static str>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: ASSISTANT_MODEL,
        }
    }
}

impl ChatStreamService for WebGeminiChatService {
    fn stream_reply(&self, history: Vec<ChatTurn>, prompt: String) -> ChatStream {
        let Some(api_key) = self.api_key else {
            return stream::once(async { Err(ChatError::MissingApiKey) }).boxed_local();
        };
        open_stream(api_key, self.model, history, prompt)
    }
}

#[cfg(target_arch = "wasm32")]
fn open_stream(
    api_key: &'static str,
    model: &'static str,
    history: Vec<ChatTurn>,
    prompt: String,
) -> ChatStream {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<Result<String, ChatError>>();
    wasm_bindgen_futures::spawn_local(async move {
        let forward = tx.clone();
        let sink = move |text: String| forward.unbounded_send(Ok(text)).is_ok();
        if let Err(err) = transport::pump(api_key, model, &history, &prompt, sink).await {
            let _ = tx.unbounded_send(Err(err));
        }
    });
    rx.boxed_local()
}

#[cfg(not(target_arch = "wasm32"))]
fn open_stream(
    api_key: &'static str,
    model: &'static str,
    history: Vec<ChatTurn>,
    prompt: String,
) -> ChatStream {
    let _ = (api_key, model, history, prompt);
    stream::once(async { Err(ChatError::Unavailable) }).boxed_local()
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use platform_host::{
        build_stream_request_body, decode_stream_chunk, stream_endpoint_url, ChatError, ChatTurn,
        SseDecoder,
    };
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, ReadableStreamDefaultReader, Request, RequestInit, RequestMode, Response};

    fn js_error(context: &str, err: JsValue) -> ChatError {
        ChatError::Transport(format!("{context}: {err:?}"))
    }

    /// Sends the request and forwards decoded fragments to `sink` until the body ends or `sink`
    /// reports the receiver is gone.
    pub(super) async fn pump(
        api_key: &str,
        model: &str,
        history: &[ChatTurn],
        prompt: &str,
        mut sink: impl FnMut(String) -> bool,
    ) -> Result<(), ChatError> {
        let window =
            web_sys::window().ok_or_else(|| ChatError::Transport("window unavailable".into()))?;

        let headers = Headers::new().map_err(|e| js_error("headers", e))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| js_error("headers", e))?;
        headers
            .set("x-goog-api-key", api_key)
            .map_err(|e| js_error("headers", e))?;

        let body = build_stream_request_body(history, prompt).to_string();
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&stream_endpoint_url(model), &init)
            .map_err(|e| js_error("request", e))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?
            .dyn_into()
            .map_err(|e| js_error("response", e))?;
        if !response.ok() {
            return Err(ChatError::Status {
                status: response.status(),
            });
        }

        let reader: ReadableStreamDefaultReader = response
            .body()
            .ok_or_else(|| ChatError::Transport("response has no body".into()))?
            .get_reader()
            .dyn_into()
            .map_err(|e| js_error("reader", e))?;

        let mut decoder = SseDecoder::default();
        loop {
            let chunk = JsFuture::from(reader.read())
                .await
                .map_err(|e| js_error("read", e))?;
            let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
                .map_err(|e| js_error("read", e))?
                .as_bool()
                .unwrap_or(true);
            if done {
                break;
            }
            let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
                .map_err(|e| js_error("read", e))?;
            let bytes = js_sys::Uint8Array::new(&value).to_vec();
            for payload in decoder.push(&bytes) {
                let text = decode_stream_chunk(&payload)?;
                if !text.is_empty() && !sink(text) {
                    let _ = reader.cancel();
                    return Ok(());
                }
            }
        }

        if let Some(payload) = decoder.finish() {
            let text = decode_stream_chunk(&payload)?;
            if !text.is_empty() {
                sink(text);
            }
        }
        Ok(())
    }
}
