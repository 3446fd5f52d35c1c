use parley_types::{LiveBuffers, MessageId, MessageRecord, StreamFrame};

/// Response text used when neither the terminal record nor the stream carried any
pub const EMPTY_RESPONSE_NOTICE: &str = "⚠️ The server returned an empty response.";

/// Folds the frames of one cycle into the content and reasoning buffers.
///
/// Buffers only grow. Once a `Done` frame has been pushed the cycle is closed
/// and every later frame is ignored.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
    reasoning: String,
    done: bool,
    final_chat: Option<MessageRecord>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame; returns false when it was ignored because the cycle is closed
    pub fn push(&mut self, frame: StreamFrame) -> bool {
        if self.done {
            return false;
        }

        match frame {
            StreamFrame::ContentDelta { text } => self.content.push_str(&text),
            StreamFrame::ReasoningDelta { text } => self.reasoning.push_str(&text),
            StreamFrame::Done { chat } => {
                self.done = true;
                self.final_chat = chat;
            }
        }

        true
    }

    /// Push frames in order, stopping at the terminal frame
    pub fn extend(&mut self, frames: impl IntoIterator<Item = StreamFrame>) {
        for frame in frames {
            if !self.push(frame) {
                break;
            }
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Current buffers for live display
    pub fn live(&self, pending_prompt: &str) -> LiveBuffers {
        LiveBuffers {
            pending_prompt: pending_prompt.to_string(),
            content: self.content.clone(),
            reasoning: self.reasoning.clone(),
        }
    }

    /// Build the record to commit for a closed cycle.
    ///
    /// Text from the terminal record wins only when non-empty; otherwise the
    /// streamed buffers are used. `fallback_id` identifies the record when the
    /// server sent none. Returns `None` if no terminal frame was seen.
    pub fn finalize(self, prompt: &str, model_id: &str, fallback_id: MessageId) -> Option<MessageRecord> {
        if !self.done {
            return None;
        }

        let mut record = self
            .final_chat
            .unwrap_or_else(|| MessageRecord::new(fallback_id, prompt, ""));

        if record.response_text.is_empty() {
            record.response_text = self.content;
        }
        if record.reasoning().is_none() {
            record.reasoning_text = Some(self.reasoning).filter(|r| !r.is_empty());
        }
        if record.prompt_text.is_empty() {
            record.prompt_text = prompt.to_string();
        }
        if record.model_id.is_none() {
            record.model_id = Some(model_id.to_string());
        }
        if record.response_text.is_empty() {
            record.response_text = EMPTY_RESPONSE_NOTICE.to_string();
        }

        Some(record)
    }
}
