// Chat sessions: transcripts, the typing delay, and the submit-and-reply exchange.
// Replies come from the assistant matcher; nothing here talks to the LLM.

pub mod exchange;
pub mod handlers;
pub mod models;
pub mod sessions;
pub mod typing;
