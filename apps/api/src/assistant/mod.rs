// Career assistant: keyword rule table and the first-match-wins responder over it.
// Pure and synchronous; the chat module adds sessions and typing delay on top.

pub mod handlers;
pub mod matcher;
pub mod rules;

pub use matcher::IntentMatcher;
