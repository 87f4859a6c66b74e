//! Session state and its transitions.

use picasso_common::{Message, MessageId, MoodData, Role};

/// Ordered history, current mood, and the reply currently being streamed.
///
/// Insertion order is chronological order. Only the message named by
/// `in_progress` ever has content appended, and only while `loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    messages: Vec<Message>,
    current_mood: MoodData,
    loading: bool,
    in_progress: Option<MessageId>,
    /// Everything streamed for the current reply so far.
    reply: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::restore(Vec::new())
    }
}

impl SessionState {
    /// Rebuild from persisted history. The current mood is the mood of the
    /// latest user message that carries one, else the neutral fallback.
    pub fn restore(messages: Vec<Message>) -> Self {
        let current_mood = messages
            .iter()
            .rev()
            .filter(|m| m.role == Role::User)
            .find_map(|m| m.mood.clone())
            .unwrap_or_else(MoodData::fallback);

        Self {
            messages,
            current_mood,
            loading: false,
            in_progress: None,
            reply: String::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn current_mood(&self) -> &MoodData {
        &self.current_mood
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn in_progress(&self) -> Option<&MessageId> {
        self.in_progress.as_ref()
    }

    pub(crate) fn set_mood(&mut self, mood: MoodData) {
        self.current_mood = mood;
    }

    pub(crate) fn push_user(&mut self, text: &str, mood: MoodData) -> MessageId {
        let message = Message::user(text, mood);
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    pub(crate) fn begin_reply(&mut self) {
        self.loading = true;
        self.in_progress = None;
        self.reply.clear();
    }

    /// Fold one fragment into the in-progress reply, creating it on the
    /// first fragment. If that message has since been removed, a new one
    /// is started holding the whole reply so far.
    pub(crate) fn apply_fragment(&mut self, fragment: &str) {
        self.reply.push_str(fragment);
        if let Some(id) = &self.in_progress {
            if let Some(message) = self.messages.iter_mut().rev().find(|m| &m.id == id) {
                message.content.push_str(fragment);
                return;
            }
        }

        let message = Message::assistant(self.reply.clone());
        self.in_progress = Some(message.id.clone());
        self.messages.push(message);
    }

    pub(crate) fn push_fallback(&mut self, text: &str) {
        self.messages.push(Message::assistant(text));
    }

    pub(crate) fn finish_reply(&mut self) {
        self.loading = false;
        self.in_progress = None;
        self.reply.clear();
    }

    /// Remove a message by id. Returns false when absent.
    pub(crate) fn delete(&mut self, id: &MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != id);
        if self.in_progress.as_ref() == Some(id) {
            self.in_progress = None;
        }
        self.messages.len() != before
    }

    /// Empty the history and reset the mood. An in-flight reply, if any,
    /// reappears as a fresh assistant message on its next fragment.
    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.current_mood = MoodData::fallback();
        self.in_progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picasso_common::Mood;

    fn mood(m: Mood) -> MoodData {
        MoodData {
            mood: m,
            confidence: 0.9,
            emoji: m.default_emoji().into(),
        }
    }

    #[test]
    fn restore_picks_latest_user_mood() {
        let messages = vec![
            Message::user("a", mood(Mood::Sad)),
            Message::user("b", mood(Mood::Angry)),
            Message::assistant("c"),
        ];
        let state = SessionState::restore(messages);
        assert_eq!(state.current_mood().mood, Mood::Angry);
        assert!(!state.is_loading());
    }

    #[test]
    fn restore_without_user_mood_is_neutral() {
        let mut bare = Message::user("no mood", MoodData::fallback());
        bare.mood = None;
        let state = SessionState::restore(vec![bare, Message::assistant("x")]);
        assert_eq!(state.current_mood(), &MoodData::fallback());
    }

    #[test]
    fn fragments_fold_into_one_reply() {
        let mut state = SessionState::default();
        state.push_user("hi", MoodData::fallback());
        state.begin_reply();
        state.apply_fragment("Hel");
        let id = state.in_progress().cloned().unwrap();
        state.apply_fragment("lo");
        state.finish_reply();

        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[1].id, id);
        assert_eq!(state.messages()[1].content, "Hello");
        assert!(state.in_progress().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn new_reply_never_extends_a_previous_assistant_message() {
        let mut state = SessionState::restore(vec![Message::assistant("old")]);
        state.begin_reply();
        state.apply_fragment("new");
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[0].content, "old");
        assert_eq!(state.messages()[1].content, "new");
    }

    #[test]
    fn deleting_the_in_progress_reply_restarts_it_with_the_full_text() {
        let mut state = SessionState::default();
        state.begin_reply();
        state.apply_fragment("a");
        let id = state.in_progress().cloned().unwrap();
        assert!(state.delete(&id));
        state.apply_fragment("b");
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content, "ab");
        assert_ne!(state.messages()[0].id, id);
    }

    #[test]
    fn clearing_mid_reply_keeps_the_accumulated_text() {
        let mut state = SessionState::default();
        state.push_user("hi", mood(Mood::Happy));
        state.begin_reply();
        state.apply_fragment("Hel");
        state.clear();
        assert!(state.messages().is_empty());
        assert!(state.is_loading());

        state.apply_fragment("lo");
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content, "Hello");
        assert_eq!(state.messages()[0].role, Role::Assistant);

        state.finish_reply();
        state.begin_reply();
        state.apply_fragment("next");
        assert_eq!(state.messages()[1].content, "next");
    }

    #[test]
    fn clear_resets_mood() {
        let mut state = SessionState::default();
        state.set_mood(mood(Mood::Happy));
        state.push_user("yay", mood(Mood::Happy));
        state.clear();
        assert!(state.messages().is_empty());
        assert_eq!(state.current_mood(), &MoodData::fallback());
    }
}
