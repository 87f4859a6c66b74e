//! Session outcome types and the in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};

use picasso_common::ChatError;

/// Assistant message appended whenever the completion request fails.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment. 💙";

/// What a `send_message` call did.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input, or another send was already in flight.
    Ignored,
    /// The stream ended normally after `fragments` content fragments.
    Completed { fragments: usize },
    /// The request failed; the transcript already shows the outcome.
    Failed(ChatError),
}

/// Marks a `send_message` call as in flight for as long as it lives.
///
/// A send that finds the flag already set is ignored rather than queued.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// Claim the session for one send. `None` while another send holds it.
    pub(crate) fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_send_at_a_time() {
        let flag = AtomicBool::new(false);
        let first = InFlight::claim(&flag).unwrap();
        assert!(InFlight::claim(&flag).is_none());
        drop(first);
        assert!(InFlight::claim(&flag).is_some());
        assert!(!flag.load(Ordering::Acquire));
    }
}
