use crate::api::ApiClient;
use crate::models::ChatMessage;

/// AI analyst chat session. The message log is view-local, unbounded, and
/// gone on teardown. One request/response round trip per submission; while
/// a request is pending, further submits are refused.
pub struct ChatPage {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pending: bool,
    conversation_id: String,
}

impl Default for ChatPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPage {
    pub fn new() -> Self {
        ChatPage {
            messages: Vec::new(),
            input: String::new(),
            pending: false,
            conversation_id: "default".to_string(),
        }
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Submit is allowed only with non-blank input and no request in flight.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Send the current input. On failure the error is logged, the pending
    /// flag clears, and the user message stays in the log with no reply.
    pub async fn submit(&mut self, api: &ApiClient) {
        if !self.can_submit() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(text.clone()));
        self.pending = true;

        match api.chat(&text, &self.conversation_id).await {
            Ok(reply) => self.messages.push(ChatMessage::assistant(reply.response)),
            Err(e) => tracing::error!("Chat request failed: {e}"),
        }
        self.pending = false;
    }
}
