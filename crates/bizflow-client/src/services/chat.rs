//! AI chat assistant
//!
//! The chat endpoint answers with a bare `{"answer": ...}` object rather than
//! the usual envelope.

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use async_trait::async_trait;
use bizflow_core::types::{ChatReply, ChatRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Something that answers chat prompts
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answer a prompt
    async fn ask(&self, prompt: &str) -> ClientResult<String>;

    /// Assistant name, for logs
    fn name(&self) -> &str;
}

/// Backend chat endpoint
#[derive(Debug, Clone)]
pub struct ChatService {
    http: HttpClient,
}

impl ChatService {
    /// Create the service
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Assistant for ChatService {
    async fn ask(&self, prompt: &str) -> ClientResult<String> {
        let request = ChatRequest {
            prompt: prompt.to_string(),
        };
        let reply: ChatReply = self.http.post_raw("/api/api/ai/chat", &request).await?;
        debug!(chars = reply.answer.len(), "Chat answer received");
        Ok(reply.answer)
    }

    fn name(&self) -> &str {
        "backend"
    }
}

/// Assistant that replays scripted answers
///
/// Useful for demos and tests. When the script runs out it keeps repeating
/// the last answer.
#[derive(Debug, Clone, Default)]
pub struct CannedAssistant {
    answers: Arc<Mutex<VecDeque<String>>>,
    last: Arc<Mutex<Option<String>>>,
    should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl CannedAssistant {
    /// Assistant answering with `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// Assistant whose every call fails
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Number of prompts received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Assistant for CannedAssistant {
    async fn ask(&self, _prompt: &str) -> ClientResult<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.should_fail {
            return Err(ClientError::Api {
                status: 503,
                code: None,
                message: "assistant unavailable".to_string(),
            });
        }

        let next = self.answers.lock().pop_front();
        let mut last = self.last.lock();
        if let Some(answer) = next {
            *last = Some(answer);
        }
        last.clone().ok_or(ClientError::MissingResult)
    }

    fn name(&self) -> &str {
        "canned"
    }
}
