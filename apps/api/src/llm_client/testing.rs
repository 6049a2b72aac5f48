//! Scripted `CompletionService` double for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionService, LlmError};

type Responder = Box<dyn Fn(&str, bool) -> Result<String, LlmError> + Send + Sync>;

/// Answers every call through a closure and records what it was asked.
pub struct ScriptedCompletion {
    responder: Responder,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, bool)>>,
}

impl ScriptedCompletion {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, bool) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always returns the same text.
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// Always fails like a quota-exhausted upstream.
    pub fn failing() -> Self {
        Self::new(|_, _| {
            Err(LlmError::Api {
                status: 429,
                message: "Resource has been exhausted (e.g. check quota).".to_string(),
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts seen so far, paired with the `structured` flag.
    pub fn prompts(&self) -> Vec<(String, bool)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str, structured: bool) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), structured));
        (self.responder)(prompt, structured)
    }
}
