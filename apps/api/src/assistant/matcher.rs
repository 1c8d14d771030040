//! Intent matcher: maps one line of free-form user text to exactly one canned reply.
//!
//! Algorithm:
//! 1. Truncate to `max_input_chars` characters, then lower-case. No other normalization.
//! 2. Walk the rule table in declaration order; the first rule with any trigger present wins.
//! 3. No match: one fallback reply drawn uniformly at random.
//!
//! The matcher is total: every input, including the empty string, yields a non-empty reply.
//! It holds no mutable state, so one instance is shared freely across sessions.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::assistant::rules::{Rule, Topic, FALLBACK_REPLIES, RULES};

/// Default bound on how much input text is inspected.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 4_000;

/// Result of a single `respond` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// `None` when the reply came from the fallback set.
    pub topic: Option<Topic>,
    pub text: &'static str,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.topic.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntentMatcher {
    rules: &'static [Rule],
    fallbacks: &'static [&'static str],
    max_input_chars: usize,
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(RULES, FALLBACK_REPLIES, DEFAULT_MAX_INPUT_CHARS)
    }
}

impl IntentMatcher {
    /// Builds a matcher over a custom table.
    ///
    /// `fallbacks` must be non-empty; an empty slice falls back to the built-in replies
    /// so that `respond` stays total.
    pub fn new(
        rules: &'static [Rule],
        fallbacks: &'static [&'static str],
        max_input_chars: usize,
    ) -> Self {
        Self {
            rules,
            fallbacks: if fallbacks.is_empty() {
                FALLBACK_REPLIES
            } else {
                fallbacks
            },
            max_input_chars,
        }
    }

    pub fn with_max_input_chars(self, max_input_chars: usize) -> Self {
        Self {
            max_input_chars,
            ..self
        }
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    /// Deterministic half of matching: the first rule whose triggers appear in `input`.
    pub fn classify(&self, input: &str) -> Option<&'static Rule> {
        let normalized = self.normalize(input);
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    /// Picks a reply, using the thread-local RNG for fallback selection.
    pub fn respond(&self, input: &str) -> Reply {
        self.respond_with(input, &mut rand::thread_rng())
    }

    /// Picks a reply, drawing fallbacks from `rng`.
    pub fn respond_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Reply {
        match self.classify(input) {
            Some(rule) => Reply {
                topic: Some(rule.topic),
                text: rule.response,
            },
            None => Reply {
                topic: None,
                text: self
                    .fallbacks
                    .choose(rng)
                    .copied()
                    .unwrap_or(FALLBACK_REPLIES[0]),
            },
        }
    }

    fn normalize(&self, input: &str) -> String {
        let bounded = match input.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => &input[..cut],
            None => input,
        };
        bounded.to_lowercase()
    }
}
