use chrono::Utc;
use futures::StreamExt;
use parking_lot::Mutex;
use parley_client::{ChatRequest, ChatTransport, ClientError};
use parley_store::ConversationStore;
use parley_stream::{decode_progress, StreamAccumulator};
use parley_types::{ConversationId, LiveBuffers, MessageRecord};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::notice::error_record;
use crate::outcome::{Phase, SendOutcome, SendRejected};

/// Runs send cycles: one streaming request per user message, folded into live
/// buffers and committed to the store as a single record.
///
/// At most one cycle runs at a time; the store's `typing` flag is the gate.
/// Live buffers and the phase are watch channels, so a display layer that
/// subscribes mid-cycle still sees the current text. Dropping a `send` future
/// aborts its request and resets the transient state without committing.
pub struct Orchestrator {
    store: Arc<ConversationStore>,
    transport: Arc<dyn ChatTransport>,
    live: watch::Sender<LiveBuffers>,
    phase: watch::Sender<Phase>,
    cancel: Mutex<CancellationToken>,
}

impl Orchestrator {
    pub fn new(store: Arc<ConversationStore>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            store,
            transport,
            live: watch::channel(LiveBuffers::default()).0,
            phase: watch::channel(Phase::Idle).0,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn live(&self) -> LiveBuffers {
        self.live.borrow().clone()
    }

    pub fn subscribe_live(&self) -> watch::Receiver<LiveBuffers> {
        self.live.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Abort the in-flight cycle, if any
    pub fn cancel(&self) {
        self.cancel.lock().cancel();
    }

    /// Send `text` to a conversation and drive the response to completion.
    ///
    /// The text goes out exactly as typed. Blank text and sends while another
    /// cycle is in flight are rejected without side effects. Transport and
    /// server failures never surface as errors: they are committed as a
    /// notice record like any response.
    pub async fn send(&self, conversation_id: ConversationId, text: &str, model_id: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Rejected(SendRejected::EmptyMessage);
        }
        if !self.store.try_begin_typing() {
            debug!(conversation_id, "Send rejected, a cycle is already in flight");
            return SendOutcome::Rejected(SendRejected::CycleInFlight);
        }

        let _reset = CycleReset { orchestrator: self };
        let token = CancellationToken::new();
        *self.cancel.lock() = token.clone();

        self.live.send_replace(LiveBuffers::for_prompt(text));
        self.phase.send_replace(Phase::Sending);
        self.store.remember_model_for_conversation(conversation_id, model_id);
        info!(conversation_id, model = model_id, "Sending message");

        let request = ChatRequest::new(conversation_id, text, model_id);
        let result = tokio::select! {
            _ = token.cancelled() => {
                info!(conversation_id, "Send cancelled");
                return SendOutcome::Cancelled;
            }
            result = self.run_cycle(request) => result,
        };

        let record = match result {
            Ok(record) => {
                self.phase.send_replace(Phase::Committing);
                record
            }
            Err(e) => {
                warn!(conversation_id, error = %e.detail(), "Send failed, committing error notice");
                self.phase.send_replace(Phase::ErrorCommitting);
                error_record(text, model_id, &e)
            }
        };

        self.store.append_message(conversation_id, record.clone());
        info!(conversation_id, message_id = record.id, "Response committed");

        SendOutcome::Committed(record)
    }

    async fn run_cycle(&self, request: ChatRequest) -> Result<MessageRecord, ClientError> {
        let body = self.transport.open_chat_stream(request.clone()).await?;
        let mut batches = decode_progress(body);
        let mut accumulator = StreamAccumulator::new();

        while let Some(batch) = batches.next().await {
            let frames = batch?;
            self.phase.send_if_modified(|phase| {
                if *phase == Phase::Sending {
                    *phase = Phase::Streaming;
                    true
                } else {
                    false
                }
            });

            if frames.is_empty() {
                continue;
            }
            accumulator.extend(frames);
            self.live.send_replace(accumulator.live(&request.message));

            if accumulator.is_done() {
                break;
            }
        }

        accumulator
            .finalize(&request.message, &request.model, Utc::now().timestamp_millis())
            .ok_or(ClientError::Incomplete)
    }
}

/// Clears the transient cycle state however `send` exits
struct CycleReset<'a> {
    orchestrator: &'a Orchestrator,
}

impl Drop for CycleReset<'_> {
    fn drop(&mut self) {
        self.orchestrator.live.send_replace(LiveBuffers::default());
        self.orchestrator.phase.send_replace(Phase::Idle);
        self.orchestrator.store.set_typing(false);
    }
}
