//! AI chat widget

use crate::messages;
use bizflow_client::Assistant;
use std::sync::Arc;
use tracing::warn;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The assistant
    Bot,
    /// The person typing
    User,
}

/// One chat bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Position in the conversation
    pub id: u64,
    /// Text
    pub text: String,
    /// Author
    pub sender: Sender,
}

/// Floating chat panel
pub struct ChatWidget {
    assistant: Arc<dyn Assistant>,
    messages: Vec<ChatMessage>,
    input: String,
    is_open: bool,
    is_loading: bool,
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("assistant", &self.assistant.name())
            .field("messages", &self.messages.len())
            .field("is_open", &self.is_open)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

impl ChatWidget {
    /// Closed widget holding the greeting
    pub fn new(assistant: Arc<dyn Assistant>) -> Self {
        let mut widget = Self {
            assistant,
            messages: Vec::new(),
            input: String::new(),
            is_open: false,
            is_loading: false,
        };
        widget.push(messages::CHAT_GREETING.to_string(), Sender::Bot);
        widget
    }

    fn push(&mut self, text: String, sender: Sender) {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage { id, text, sender });
    }

    /// Conversation so far
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Open or close the panel
    pub const fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Whether the panel is open
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether a reply is awaited
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Pending input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Edit the pending input
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Send the pending input
    ///
    /// Blank input is ignored and returns `false`. The user message is
    /// appended before the request; the reply, or an apology on failure,
    /// follows it.
    pub async fn send(&mut self) -> bool {
        if self.input.trim().is_empty() {
            return false;
        }

        let prompt = std::mem::take(&mut self.input);
        self.push(prompt.clone(), Sender::User);
        self.is_loading = true;

        let reply = match self.assistant.ask(&prompt).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(assistant = self.assistant.name(), error = %err, "Chat request failed");
                messages::CHAT_BUSY.to_string()
            }
        };

        self.push(reply, Sender::Bot);
        self.is_loading = false;
        true
    }
}
