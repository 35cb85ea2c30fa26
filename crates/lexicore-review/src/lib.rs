//! LexiCore Review — external completion client and review orchestration.
//!
//! The completion call goes to OpenRouter — no local model required. The
//! orchestrator turns a prompt plus a project's stored PDF into an answer,
//! degrading to a fixed fallback when the upstream misbehaves.

pub mod client;
pub mod orchestrator;

pub use client::{CompletionBackend, CompletionError, OpenRouterClient};
pub use orchestrator::{greeting_reply, ReviewReply, Reviewer};
