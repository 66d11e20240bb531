//! Nebula AI assistant desktop app.
//!
//! Conversation state is a plain value type updated from streamed reply fragments, so the
//! send/stream/error transitions are testable without a browser. The view binds that state to a
//! message list, a typing indicator, and a single-line prompt input.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    window_primary_input_dom_id, AppServices, AssistantService, WindowRuntimeId,
};
use futures::StreamExt;
use leptos::*;
use platform_host::{ChatError, ChatRole, ChatStream, ChatTurn};

/// First model message shown in every new conversation.
pub const GREETING: &str = "Hello! I am Nebula AI. How can I assist you today?";
/// Reply shown when the host has no API key configured.
pub const MISSING_KEY_REPLY: &str = "Error: API Key not configured.";
/// Reply shown when a request fails for any other reason.
pub const CONNECTION_ERROR_REPLY: &str =
    "Sorry, I encountered an error connecting to the neural network.";

/// One streamed step of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyUpdate {
    /// Next fragment of reply text.
    Fragment(String),
    /// The reply failed; no further fragments follow.
    Failed(ChatError),
    /// The reply stream ended.
    Finished,
}

/// Assistant conversation transcript and request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Messages in display order, starting with [`GREETING`].
    pub messages: Vec<ChatTurn>,
    /// `true` while a reply is outstanding.
    pub loading: bool,
    reply_open: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: vec![ChatTurn::model(GREETING)],
            loading: false,
            reply_open: false,
        }
    }
}

impl Conversation {
    /// Records a user prompt and returns the `(history, prompt)` pair to request.
    ///
    /// Returns `None` for blank input or while a reply is already outstanding.
    pub fn begin_send(&mut self, input: &str) -> Option<(Vec<ChatTurn>, String)> {
        let prompt = input.trim();
        if prompt.is_empty() || self.loading {
            return None;
        }
        let history = self.messages.clone();
        self.messages.push(ChatTurn::user(prompt));
        self.loading = true;
        self.reply_open = false;
        Some((history, prompt.to_string()))
    }

    /// Applies one streamed reply step.
    pub fn apply(&mut self, update: ReplyUpdate) {
        match update {
            ReplyUpdate::Fragment(text) => {
                if !self.reply_open {
                    self.messages.push(ChatTurn::model(String::new()));
                    self.reply_open = true;
                }
                if let Some(reply) = self.messages.last_mut() {
                    reply.text.push_str(&text);
                }
            }
            ReplyUpdate::Failed(err) => {
                let text = match err {
                    ChatError::MissingApiKey => MISSING_KEY_REPLY,
                    _ => CONNECTION_ERROR_REPLY,
                };
                self.messages.push(ChatTurn::model(text));
                self.finish();
            }
            ReplyUpdate::Finished => self.finish(),
        }
    }

    /// Row index and role of every message. Rows are keyed by position so a streamed reply
    /// keeps its row while its text grows.
    pub fn rows(&self) -> Vec<(usize, ChatRole)> {
        self.messages.iter().map(|m| m.role).enumerate().collect()
    }

    /// Text of the message at `idx`, or empty when out of range.
    pub fn text_at(&self, idx: usize) -> String {
        self.messages
            .get(idx)
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }

    fn finish(&mut self) {
        self.loading = false;
        self.reply_open = false;
    }
}

/// Feeds every item of `stream` to `apply`, ending with exactly one terminal update.
pub async fn drive_reply(mut stream: ChatStream, mut apply: impl FnMut(ReplyUpdate)) {
    while let Some(item) = stream.next().await {
        match item {
            Ok(text) => apply(ReplyUpdate::Fragment(text)),
            Err(err) => {
                apply(ReplyUpdate::Failed(err));
                return;
            }
        }
    }
    apply(ReplyUpdate::Finished);
}

fn message_class(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "assistant-message user",
        ChatRole::Model => "assistant-message model",
    }
}

#[component]
/// Assistant app window contents.
pub fn AssistantApp(
    /// Runtime window id, used for the prompt input's focus target.
    window_id: WindowRuntimeId,
    /// Capability-scoped services; the assistant needs `assistant`.
    services: AppServices,
) -> impl IntoView {
    let conversation = create_rw_signal(Conversation::default());
    let input = create_rw_signal(String::new());
    let messages_end = create_node_ref::<html::Div>();
    let assistant: Option<AssistantService> = services.assistant;

    create_effect(move |_| {
        conversation.with(|c| c.messages.len());
        if let Some(end) = messages_end.get() {
            end.scroll_into_view();
        }
    });

    let send = move || {
        let text = input.get_untracked();
        let Some((history, prompt)) = conversation
            .try_update(|c| c.begin_send(&text))
            .flatten()
        else {
            return;
        };
        input.set(String::new());

        let Some(assistant) = assistant.clone() else {
            logging::warn!("assistant capability missing; reply unavailable");
            conversation.update(|c| c.apply(ReplyUpdate::Failed(ChatError::Unavailable)));
            return;
        };
        let stream = assistant.stream_reply(history, prompt);
        spawn_local(async move {
            drive_reply(stream, |update| {
                if let ReplyUpdate::Failed(err) = &update {
                    logging::warn!("assistant reply failed: {err}");
                }
                conversation.update(|c| c.apply(update));
            })
            .await;
        });
    };
    let send_on_click = send.clone();

    view! {
        <div class="app-assistant">
            <div class="assistant-messages" role="log" aria-live="polite">
                <For
                    each=move || conversation.with(Conversation::rows)
                    key=|(idx, _)| *idx
                    let:entry
                >
                    {{
                        let (idx, role) = entry;
                        view! {
                            <div class=message_class(role)>
                                <Show when=move || idx == 0 fallback=|| ()>
                                    <div class="assistant-badge">"Nebula AI"</div>
                                </Show>
                                <div class="assistant-message-text">
                                    {move || conversation.with(|c| c.text_at(idx))}
                                </div>
                            </div>
                        }
                    }}
                </For>
                <Show when=move || conversation.with(|c| c.loading) fallback=|| ()>
                    <div class="assistant-typing" aria-label="Nebula AI is typing">
                        <span></span>
                        <span></span>
                        <span></span>
                    </div>
                </Show>
                <div node_ref=messages_end></div>
            </div>

            <div class="assistant-composer">
                <input
                    id=window_primary_input_dom_id(window_id)
                    type="text"
                    class="assistant-input"
                    placeholder="Ask anything..."
                    aria-label="Message Nebula AI"
                    prop:value=move || input.get()
                    prop:disabled=move || conversation.with(|c| c.loading)
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            send();
                        }
                    }
                />
                <button
                    type="button"
                    class="assistant-send"
                    aria-label="Send message"
                    disabled=move || {
                        conversation.with(|c| c.loading) || input.with(|text| text.trim().is_empty())
                    }
                    on:click=move |_| send_on_click()
                >
                    "Send"
                </button>
                <div class="assistant-disclaimer">"Nebula AI may display inaccurate info."</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use platform_host::{ChatStreamService, ScriptedChatStreamService};
    use pretty_assertions::assert_eq;

    use super::*;

    fn texts(conversation: &Conversation) -> Vec<(ChatRole, &str)> {
        conversation
            .messages
            .iter()
            .map(|m| (m.role, m.text.as_str()))
            .collect()
    }

    fn run(conversation: &RefCell<Conversation>, stream: ChatStream) {
        block_on(drive_reply(stream, |update| {
            conversation.borrow_mut().apply(update)
        }));
    }

    #[test]
    fn blank_input_and_concurrent_sends_are_ignored() {
        let mut conversation = Conversation::default();
        assert_eq!(conversation.begin_send("   "), None);

        let (history, prompt) = conversation.begin_send("  hi  ").expect("send");
        assert_eq!(history, vec![ChatTurn::model(GREETING)]);
        assert_eq!(prompt, "hi");
        assert!(conversation.loading);

        assert_eq!(conversation.begin_send("again"), None);
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn streamed_fragments_accumulate_into_one_reply() {
        let chat = ScriptedChatStreamService::default();
        chat.push_reply(vec![Ok("Hel".to_string()), Ok("lo!".to_string())]);
        let conversation = RefCell::new(Conversation::default());

        let (history, prompt) = conversation.borrow_mut().begin_send("hi").expect("send");
        run(&conversation, chat.stream_reply(history, prompt));

        let conversation = conversation.into_inner();
        assert_eq!(texts(&conversation), vec![
            (ChatRole::Model, GREETING),
            (ChatRole::User, "hi"),
            (ChatRole::Model, "Hello!"),
        ]);
        assert!(!conversation.loading);
        assert_eq!(chat.requests()[0].1, "hi");
    }

    #[test]
    fn streamed_reply_keeps_its_row_while_text_grows() {
        let mut conversation = Conversation::default();
        conversation.begin_send("hi").expect("send");

        conversation.apply(ReplyUpdate::Fragment("Hel".to_string()));
        let rows_after_first = conversation.rows();
        conversation.apply(ReplyUpdate::Fragment("lo".to_string()));

        assert_eq!(conversation.rows(), rows_after_first);
        assert_eq!(rows_after_first, vec![
            (0, ChatRole::Model),
            (1, ChatRole::User),
            (2, ChatRole::Model),
        ]);
        assert_eq!(conversation.text_at(2), "Hello");
        assert_eq!(conversation.text_at(9), "");
    }

    #[test]
    fn missing_key_shows_configuration_error() {
        let chat = ScriptedChatStreamService::default();
        chat.push_reply(vec![Err(ChatError::MissingApiKey)]);
        let conversation = RefCell::new(Conversation::default());

        let (history, prompt) = conversation.borrow_mut().begin_send("hi").expect("send");
        run(&conversation, chat.stream_reply(history, prompt));

        let conversation = conversation.into_inner();
        assert_eq!(
            conversation.messages.last().map(|m| m.text.as_str()),
            Some(MISSING_KEY_REPLY)
        );
        assert!(!conversation.loading);
    }

    #[test]
    fn mid_stream_failure_keeps_partial_reply_and_appends_apology() {
        let chat = ScriptedChatStreamService::default();
        chat.push_reply(vec![
            Ok("Partial".to_string()),
            Err(ChatError::Status { status: 503 }),
            Ok("never shown".to_string()),
        ]);
        let conversation = RefCell::new(Conversation::default());

        let (history, prompt) = conversation.borrow_mut().begin_send("hi").expect("send");
        run(&conversation, chat.stream_reply(history, prompt));

        let conversation = conversation.into_inner();
        assert_eq!(texts(&conversation)[2..].to_vec(), vec![
            (ChatRole::Model, "Partial"),
            (ChatRole::Model, CONNECTION_ERROR_REPLY),
        ]);
    }

    #[test]
    fn second_prompt_sends_full_transcript_as_history() {
        let chat = ScriptedChatStreamService::default();
        chat.push_reply(vec![Ok("One".to_string())]);
        chat.push_reply(vec![Ok("Two".to_string())]);
        let conversation = RefCell::new(Conversation::default());

        for prompt in ["first", "second"] {
            let (history, prompt) = conversation.borrow_mut().begin_send(prompt).expect("send");
            run(&conversation, chat.stream_reply(history, prompt));
        }

        let requests = chat.requests();
        assert_eq!(requests[1].0, vec![
            ChatTurn::model(GREETING),
            ChatTurn::user("first"),
            ChatTurn::model("One"),
        ]);
    }
}
