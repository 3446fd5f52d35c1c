/// Cumulative text of a streaming response body.
///
/// Chunks may split a multi-byte UTF-8 sequence; the incomplete tail is held
/// back until the next chunk completes it. Invalid bytes become U+FFFD.
pub struct ResponseSnapshot {
    text: String,
    pending: Vec<u8>,
}

impl ResponseSnapshot {
    /// Create a new snapshot with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            pending: Vec::new(),
        }
    }

    /// Add a chunk of raw body bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.pending.clear();
                    return;
                }
                Err(err) => {
                    let (valid, rest) = self.pending.split_at(err.valid_up_to());
                    self.text.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        // Truncated sequence at the end: wait for more bytes
                        None => {
                            let remainder = rest.to_vec();
                            self.pending = remainder;
                            return;
                        }
                        Some(invalid_len) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            let remainder = rest[invalid_len..].to_vec();
                            self.pending = remainder;
                        }
                    }
                }
            }
        }
    }

    /// Flush bytes still held back once the body has ended
    pub fn finish(&mut self) {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.text.push_str(&String::from_utf8_lossy(&pending));
        }
    }

    /// All text decoded so far
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.pending.is_empty()
    }
}

impl Default for ResponseSnapshot {
    fn default() -> Self {
        Self::with_capacity(4096)
    }
}
