use parley_types::{MessageRecord, StreamFrame, StreamPayload};
use tracing::{debug, warn};

/// Prefix of every meaningful line in the chat stream
pub const DATA_PREFIX: &str = "data: ";

/// Terminal marker some proxies append after the last payload
pub const DONE_MARKER: &str = "[DONE]";

enum Record {
    Frames(Vec<StreamFrame>),
    /// Not a data line (comment, `event:` field, blank separator)
    Ignored,
    /// Data line whose payload did not parse
    Unparsed(serde_json::Error),
}

/// Incremental decoder over the cumulative text of a response body.
///
/// Each call receives everything received so far and returns only the frames
/// found after the last consumed byte. Newline-terminated records are always
/// consumed; the unterminated tail is consumed only once it parses, otherwise
/// it is scanned again on the next call.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    consumed: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of the cumulative text already decoded
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Decode frames from the part of `cumulative` not seen yet
    pub fn decode(&mut self, cumulative: &str) -> Vec<StreamFrame> {
        self.scan(cumulative, false)
    }

    /// Final pass at end of body: the unterminated tail is decoded or dropped
    pub fn finish(&mut self, cumulative: &str) -> Vec<StreamFrame> {
        self.scan(cumulative, true)
    }

    fn scan(&mut self, cumulative: &str, at_end: bool) -> Vec<StreamFrame> {
        let unseen = match cumulative.get(self.consumed..) {
            Some(unseen) => unseen,
            None => {
                warn!(
                    consumed = self.consumed,
                    len = cumulative.len(),
                    "Response text shrank below decoded offset, restarting decode"
                );
                self.consumed = 0;
                cumulative
            }
        };

        let mut frames = Vec::new();
        let mut offset = self.consumed;
        let mut rest = unseen;

        while let Some(newline) = rest.find('\n') {
            match parse_record(&rest[..newline]) {
                Record::Frames(decoded) => frames.extend(decoded),
                Record::Ignored => {}
                Record::Unparsed(e) => {
                    debug!("Dropping malformed stream line: {}", e);
                }
            }

            offset += newline + 1;
            rest = &rest[newline + 1..];
        }

        if !rest.is_empty() {
            match parse_record(rest) {
                Record::Frames(decoded) => {
                    frames.extend(decoded);
                    offset += rest.len();
                }
                _ if at_end => {
                    debug!(len = rest.len(), "Discarding incomplete trailing line");
                    offset += rest.len();
                }
                _ => {
                    debug!("Skipping incomplete chunk");
                }
            }
        }

        self.consumed = offset;
        frames
    }
}

fn parse_record(line: &str) -> Record {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return Record::Ignored;
    };

    if data.trim() == DONE_MARKER {
        return Record::Frames(vec![StreamFrame::done(None)]);
    }

    match serde_json::from_str::<StreamPayload>(data) {
        Ok(payload) => Record::Frames(payload_frames(payload)),
        Err(e) => Record::Unparsed(e),
    }
}

fn payload_frames(payload: StreamPayload) -> Vec<StreamFrame> {
    let mut frames = Vec::new();

    if let Some(text) = payload.content.filter(|t| !t.is_empty()) {
        frames.push(StreamFrame::ContentDelta { text });
    }

    if let Some(text) = payload.reasoning_content.filter(|t| !t.is_empty()) {
        frames.push(StreamFrame::ReasoningDelta { text });
    }

    if payload.done {
        let chat = payload
            .chat
            .filter(|value| !value.is_null())
            .and_then(|value| match serde_json::from_value::<MessageRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Malformed record in terminal frame, using streamed text: {}", e);
                    None
                }
            });

        frames.push(StreamFrame::Done { chat });
    }

    frames
}
