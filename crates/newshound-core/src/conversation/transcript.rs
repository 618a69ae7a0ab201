//! In-memory conversation log with derived context.
//!
//! The context scalar is what grounds the backend's follow-up answers:
//! the contents of every non-failed assistant reply, space-joined in
//! insertion order. It is maintained incrementally on append for cheap
//! reads, and [`derive_context`](Transcript::derive_context) is the
//! source of truth the cache must always equal.

use newshound_types::chat::{Role, Turn};

/// Ordered log of conversation turns plus the context cache.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    context: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns in submission order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The incrementally maintained context cache.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Replace the whole log (hydration, reset) and rebuild the context
    /// cache from scratch.
    pub fn replace_all(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
        self.context = self.derive_context();
    }

    /// Append one turn, extending the context cache when the turn
    /// contributes to it.
    pub fn append(&mut self, turn: Turn) {
        if contributes(&turn) {
            if !self.context.is_empty() {
                self.context.push(' ');
            }
            self.context.push_str(&turn.content);
        }
        self.turns.push(turn);
    }

    /// Recompute the context from the current turns.
    pub fn derive_context(&self) -> String {
        self.turns
            .iter()
            .filter(|turn| contributes(turn))
            .map(|turn| turn.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Whether a turn contributes to context: non-failed assistant replies
/// with non-empty content. Empty contents are skipped on both the
/// incremental and recomputed paths so the separator bookkeeping stays
/// aligned.
fn contributes(turn: &Turn) -> bool {
    turn.role == Role::Assistant && !turn.failed && !turn.content.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_cache_matches(transcript: &Transcript) {
        assert_eq!(transcript.context(), transcript.derive_context());
    }

    #[test]
    fn context_is_assistant_contents_space_joined() {
        let mut transcript = Transcript::new();
        for turn in [
            Turn::user("a"),
            Turn::assistant("b", Vec::new()),
            Turn::user("c"),
            Turn::assistant("d", Vec::new()),
        ] {
            transcript.append(turn);
            assert_cache_matches(&transcript);
        }
        assert_eq!(transcript.context(), "b d");
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn replace_all_rebuilds_context() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("stale", Vec::new()));

        transcript.replace_all(vec![
            Turn::user("hi"),
            Turn::assistant("hello", Vec::new()),
        ]);
        assert_eq!(transcript.context(), "hello");
        assert_cache_matches(&transcript);
    }

    #[test]
    fn replace_all_with_empty_clears_context() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("b", Vec::new()));
        transcript.replace_all(Vec::new());
        assert!(transcript.is_empty());
        assert_eq!(transcript.context(), "");
    }

    #[test]
    fn failed_turns_are_logged_but_not_in_context() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("b", Vec::new()));
        transcript.append(Turn::user("c"));
        transcript.append(Turn::failure("boom"));
        assert_cache_matches(&transcript);

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.context(), "b");
        assert!(transcript.turns()[2].failed);
    }

    #[test]
    fn context_survives_failure_then_recovery() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("b", Vec::new()));
        transcript.append(Turn::failure("boom"));
        transcript.append(Turn::assistant("d", Vec::new()));
        assert_eq!(transcript.context(), "b d");
        assert_cache_matches(&transcript);
    }

    #[test]
    fn empty_assistant_content_keeps_cache_aligned() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::assistant("", Vec::new()));
        assert_cache_matches(&transcript);
        transcript.append(Turn::assistant("x", Vec::new()));
        assert_eq!(transcript.context(), "x");
        assert_cache_matches(&transcript);
    }

    #[test]
    fn user_turns_never_contribute() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("only me here"));
        assert_eq!(transcript.context(), "");
        assert_cache_matches(&transcript);
    }
}
