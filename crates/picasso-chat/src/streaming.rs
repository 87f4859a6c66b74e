//! Server-Sent Events (SSE) fragment decoder.
//!
//! The completion endpoint streams OpenAI-style chunks:
//!
//! ```text
//! data: {"choices":[{"delta":{"content":"Hel"}}]}
//!
//! data: {"choices":[{"delta":{"content":"lo"}}]}
//!
//! data: [DONE]
//! ```
//!
//! [`FrameDecoder`] turns arbitrarily split chunks of that text into the
//! content fragments to append to the assistant message. Transport chunks
//! may cut a line (or a UTF-8 character) in half or batch many lines;
//! undecoded text is carried over to the next chunk.
//!
//! A `data:` payload that is not valid JSON is treated as truncated: the
//! line goes back to the front of the buffer and decoding of the current
//! chunk stops. A payload that is malformed rather than truncated therefore
//! holds back every later line until [`FrameDecoder::finish`] flushes the
//! buffer at end of stream.

use std::collections::VecDeque;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use picasso_common::ChatError;
use tracing::debug;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_SENTINEL: &str = "[DONE]";

/// Raw response body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ChatError>> + Send>>;

enum LineKind {
    Ignored,
    Fragment(String),
    Done,
    Unparsed,
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() || line.starts_with(':') {
        return LineKind::Ignored;
    }
    let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
        return LineKind::Ignored;
    };

    let payload = rest.trim();
    if payload == DONE_SENTINEL {
        return LineKind::Done;
    }

    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(json) => json
            .pointer("/choices/0/delta/content")
            .and_then(|c| c.as_str())
            .filter(|c| !c.is_empty())
            .map(|c| LineKind::Fragment(c.to_string()))
            .unwrap_or(LineKind::Ignored),
        Err(_) => LineKind::Unparsed,
    }
}

/// Incremental decoder for one response stream.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet split into complete lines.
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence.
    pending: Vec<u8>,
    done: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `[DONE]` was seen or [`finish`](Self::finish) ran.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed raw body bytes.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.pending.extend_from_slice(bytes);
        let text = self.decode_pending();
        self.feed(&text)
    }

    /// Feed already-decoded text.
    pub fn feed(&mut self, text: &str) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buffer.push_str(text);

        let mut fragments = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }

            match classify(&line) {
                LineKind::Ignored => {}
                LineKind::Fragment(fragment) => fragments.push(fragment),
                LineKind::Done => {
                    self.terminate();
                    break;
                }
                LineKind::Unparsed => {
                    debug!(len = line.len(), "unparsed data line, waiting for more input");
                    line.push('\n');
                    self.buffer.insert_str(0, &line);
                    break;
                }
            }
        }
        fragments
    }

    /// End-of-stream flush: decode whatever is still buffered, best effort.
    /// The decoder is done afterwards regardless of what remains.
    pub fn finish(&mut self) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        if !self.pending.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending).into_owned();
            self.buffer.push_str(&tail);
        }
        let rest = std::mem::take(&mut self.buffer);
        self.terminate();

        let mut fragments = Vec::new();
        for raw in rest.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match classify(line) {
                LineKind::Fragment(fragment) => fragments.push(fragment),
                LineKind::Done => break,
                LineKind::Unparsed => debug!("dropping unparsed trailing line"),
                LineKind::Ignored => {}
            }
        }
        fragments
    }

    fn terminate(&mut self) {
        self.done = true;
        self.buffer.clear();
        self.pending.clear();
    }

    /// Move every complete UTF-8 sequence out of `pending`.
    fn decode_pending(&mut self) -> String {
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(invalid) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + invalid);
                        }
                        None => {
                            // Incomplete sequence at the end: keep it for the next chunk.
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }
}

struct FragmentState {
    source: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<String>,
    finished: bool,
}

/// Lazily decode a response body into content fragments.
///
/// The stream ends at `[DONE]` or at end of body (after the final flush).
/// A transport error is yielded once and ends the stream. Chunk N is fully
/// decoded before chunk N+1 is read.
pub fn fragment_stream(source: ByteStream) -> impl Stream<Item = Result<String, ChatError>> + Send {
    let state = FragmentState {
        source,
        decoder: FrameDecoder::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.ready.pop_front() {
                return Some((Ok(fragment), state));
            }
            if state.finished {
                return None;
            }

            match state.source.next().await {
                Some(Ok(chunk)) => {
                    state.ready.extend(state.decoder.feed_bytes(&chunk));
                    state.finished = state.decoder.is_done();
                }
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.ready.extend(state.decoder.finish());
                    state.finished = true;
                }
            }
        }
    })
}
