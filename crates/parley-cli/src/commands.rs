use anyhow::{bail, Context, Result};
use parley_session::{ChatService, Orchestrator, SendOutcome};
use parley_types::ConversationId;
use std::io::{self, Write};
use tracing::info;

use crate::render::{self, LivePrinter};

/// Everything a command needs, built once in `main`
pub struct App {
    pub service: ChatService,
    pub orchestrator: Orchestrator,
    pub default_model: Option<String>,
}

impl App {
    pub async fn conversations(&self) -> Result<()> {
        let conversations = self
            .service
            .load_conversations()
            .await
            .context("Failed to load conversations")?;

        render::print_conversations(&mut io::stdout().lock(), &conversations)?;
        Ok(())
    }

    pub async fn models(&self) -> Result<()> {
        let catalog = self.service.load_models().await;
        render::print_models(&mut io::stdout().lock(), &catalog)?;
        Ok(())
    }

    pub async fn history(&self, id: ConversationId) -> Result<()> {
        self.service
            .load_conversation(id)
            .await
            .with_context(|| format!("Failed to load conversation {}", id))?;

        let messages = self
            .service
            .store()
            .active_conversation()
            .map(|c| c.messages)
            .unwrap_or_default();
        render::print_history(&mut io::stdout().lock(), &messages)?;
        Ok(())
    }

    pub async fn create(&self, title: &str) -> Result<()> {
        let summary = self
            .service
            .create_conversation(title)
            .await
            .context("Failed to create conversation")?;

        println!("Created conversation {}: {}", summary.id, summary.title);
        Ok(())
    }

    pub async fn delete(&self, id: ConversationId) -> Result<()> {
        self.service
            .delete_conversation(id)
            .await
            .with_context(|| format!("Failed to delete conversation {}", id))?;

        println!("Deleted conversation {}", id);
        Ok(())
    }

    /// Send one message and stream the response to stdout until it is committed
    pub async fn send(&self, id: ConversationId, message: &str, model: Option<String>) -> Result<()> {
        self.service.load_models().await;
        self.service
            .load_conversation(id)
            .await
            .with_context(|| format!("Failed to load conversation {}", id))?;

        let model = self.resolve_model(id, model)?;
        info!(conversation_id = id, model = %model, "Model selected");

        let mut live = self.orchestrator.subscribe_live();
        let mut printer = LivePrinter::new();
        let send = self.orchestrator.send(id, message, &model);
        tokio::pin!(send);

        let outcome = loop {
            tokio::select! {
                outcome = &mut send => break outcome,
                changed = live.changed() => {
                    if changed.is_ok() {
                        let buffers = live.borrow_and_update().clone();
                        printer.update(&mut io::stdout(), &mut io::stderr(), &buffers)?;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, cancelling");
                    self.orchestrator.cancel();
                }
            }
        };

        match outcome {
            SendOutcome::Committed(record) => {
                let mut out = io::stdout();
                printer.finish(&mut out, &record)?;
                out.flush()?;
                Ok(())
            }
            SendOutcome::Rejected(reason) => bail!("Message not sent: {}", reason),
            SendOutcome::Cancelled => {
                eprintln!("\nCancelled.");
                Ok(())
            }
        }
    }

    /// Explicit choice first, then the catalog fallback, then the configured default
    fn resolve_model(&self, id: ConversationId, explicit: Option<String>) -> Result<String> {
        if let Some(model) = explicit {
            return Ok(model);
        }

        match self
            .service
            .store()
            .select_model_for(id)
            .or_else(|| self.default_model.clone())
        {
            Some(model) => Ok(model),
            None => bail!("No active model available; pass --model <id>"),
        }
    }
}
