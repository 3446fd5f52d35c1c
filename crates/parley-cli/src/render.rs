use parley_types::{ConversationSummary, LiveBuffers, MessageRecord, ModelCatalog};
use std::io::{self, Write};

/// Prints the growth of the live buffers as it happens.
///
/// Buffers only grow within a cycle, so each update prints the suffix past
/// what was already written. Reasoning goes to `thoughts`, content to `out`.
#[derive(Debug, Default)]
pub struct LivePrinter {
    reasoning: usize,
    content: String,
}

impl LivePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<W: Write, R: Write>(
        &mut self,
        out: &mut W,
        thoughts: &mut R,
        live: &LiveBuffers,
    ) -> io::Result<()> {
        // Cleared buffers mean the cycle ended; the record is printed by `finish`
        if live.is_empty() {
            return Ok(());
        }

        if let Some(new) = live.reasoning.get(self.reasoning..).filter(|s| !s.is_empty()) {
            write!(thoughts, "{}", new)?;
            thoughts.flush()?;
            self.reasoning = live.reasoning.len();
        }
        if let Some(new) = live.content.get(self.content.len()..).filter(|s| !s.is_empty()) {
            write!(out, "{}", new)?;
            out.flush()?;
            self.content.push_str(new);
        }

        Ok(())
    }

    /// Print whatever part of the committed response has not been shown yet
    pub fn finish<W: Write>(&mut self, out: &mut W, record: &MessageRecord) -> io::Result<()> {
        match record.response_text.strip_prefix(self.content.as_str()) {
            Some(rest) => writeln!(out, "{}", rest)?,
            // Final text diverged from what was streamed
            None => writeln!(out, "\n{}", record.response_text)?,
        }
        out.flush()
    }
}

pub fn print_conversations<W: Write>(out: &mut W, conversations: &[ConversationSummary]) -> io::Result<()> {
    if conversations.is_empty() {
        return writeln!(out, "No conversations yet.");
    }

    for c in conversations {
        let last = c
            .last_message_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{:>6}  {:<40}  {:>5} msgs  {}", c.id, c.title, c.chats_count, last)?;
    }
    Ok(())
}

pub fn print_models<W: Write>(out: &mut W, catalog: &ModelCatalog) -> io::Result<()> {
    if catalog.is_empty() {
        return writeln!(out, "No models available.");
    }

    let advertised = catalog.advertised_default();
    for model in catalog.sorted() {
        let mut flags = Vec::new();
        if model.is_default || advertised == Some(model.id.as_str()) {
            flags.push("default");
        }
        if model.can_reason {
            flags.push("reasoning");
        }
        if !model.is_active {
            flags.push("inactive");
        }

        writeln!(
            out,
            "{:<32}  {:<28}  {:<12}  {}",
            model.id,
            model.display_name,
            model.provider,
            flags.join(", ")
        )?;
    }
    Ok(())
}

pub fn print_history<W: Write>(out: &mut W, messages: &[MessageRecord]) -> io::Result<()> {
    for record in messages {
        writeln!(out, "> {}", record.prompt_text)?;
        if let Some(reasoning) = record.reasoning() {
            writeln!(out, "  [reasoning] {}", reasoning)?;
        }
        match record.model_id.as_deref() {
            Some(model) => writeln!(out, "[{}] {}", model, record.response_text)?,
            None => writeln!(out, "{}", record.response_text)?,
        }
        writeln!(out)?;
    }
    Ok(())
}
