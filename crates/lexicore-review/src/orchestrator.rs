//! Review orchestration: prompt + stored PDF -> answer string.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::client::CompletionBackend;

/// Canned reply for bare greetings, short-circuiting the whole pipeline.
pub const GREETING_REPLY: &str = "Hey there! How can I help you with your project today?";

const GREETINGS: [&str; 4] = ["hi", "hello", "hey", "yo"];

/// Returned when the completion call fails outright.
pub const FALLBACK_MESSAGE: &str = "No AI response due to API error.";

/// Returned when the upstream succeeds but hands back no content.
pub const NO_ANSWER_MESSAGE: &str = "No AI response available.";

/// If the prompt is exactly a greeting (case-insensitive, trimmed), the
/// caller should reply with the canned greeting and skip extraction and the
/// completion call entirely.
pub fn greeting_reply(prompt: &str) -> Option<&'static str> {
    let p = prompt.trim().to_lowercase();
    GREETINGS.contains(&p.as_str()).then_some(GREETING_REPLY)
}

/// Outcome of a review. The degraded path is a successful response carrying
/// a fallback message; upstream failures never surface as errors.
#[derive(Debug, Clone)]
pub struct ReviewReply {
    pub message: String,
    pub degraded: bool,
}

/// Turns a (stored document, prompt) pair into an answer string.
pub struct Reviewer<C: CompletionBackend> {
    backend: C,
    uploads_dir: PathBuf,
}

impl<C: CompletionBackend> Reviewer<C> {
    pub fn new(backend: C, uploads_dir: impl AsRef<Path>) -> Self {
        Self {
            backend,
            uploads_dir: uploads_dir.as_ref().to_path_buf(),
        }
    }

    /// Answer `prompt` about the document stored at `file_path` (the
    /// record's public `/uploads/...` path). Extraction is best-effort; a
    /// failed completion call degrades to a fixed fallback message.
    pub async fn review(&self, prompt: &str, file_path: &str) -> ReviewReply {
        let context = self.document_text(file_path).await;
        let instruction = build_instruction(prompt, &context);

        match self.backend.complete(&instruction).await {
            Ok(answer) if !answer.trim().is_empty() => ReviewReply {
                message: answer,
                degraded: false,
            },
            Ok(_) => ReviewReply {
                message: NO_ANSWER_MESSAGE.into(),
                degraded: true,
            },
            Err(e) => {
                warn!("Completion call failed: {}", e);
                ReviewReply {
                    message: FALLBACK_MESSAGE.into(),
                    degraded: true,
                }
            }
        }
    }

    /// Extracted text of the stored PDF; empty on any failure.
    async fn document_text(&self, file_path: &str) -> String {
        let Some(path) = self.resolve_upload(file_path) else {
            return String::new();
        };

        // pdf parsing is CPU-bound; keep it off the async executor
        let result = tokio::task::spawn_blocking(move || lexicore_ingest::extract_text(&path)).await;

        match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("PDF extraction failed for {}: {}", file_path, e);
                String::new()
            }
            Err(e) => {
                warn!("PDF extraction task failed for {}: {}", file_path, e);
                String::new()
            }
        }
    }

    /// Map a public `/uploads/<name>` path to the uploads directory,
    /// refusing anything that escapes it.
    fn resolve_upload(&self, file_path: &str) -> Option<PathBuf> {
        let name = file_path.strip_prefix("/uploads/")?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.uploads_dir.join(name))
    }
}

/// Combine the prompt with extracted document text into one instruction,
/// constraining the reply to a short, friendly 3-5 sentence answer.
fn build_instruction(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "{}.\nKeep your response friendly, short, and concise. \
             Limit it to 3-5 sentences.",
            prompt
        )
    } else {
        format!(
            "Analyze the following PDF content and {}.\n\
             Keep your response friendly, short, and concise. \
             Limit it to 3-5 sentences.\n\nPDF Content:\n{}",
            prompt, context
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CompletionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum MockMode {
        Reply(&'static str),
        Empty,
        Fail,
    }

    struct MockBackend {
        mode: MockMode,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(mode: MockMode) -> Self {
            Self {
                mode,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CompletionBackend for MockBackend {
        async fn complete(&self, _instruction: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                MockMode::Reply(text) => Ok(text.to_string()),
                MockMode::Empty => Ok(String::new()),
                MockMode::Fail => Err(CompletionError::Api {
                    status: 500,
                    message: "simulated outage".into(),
                }),
            }
        }
    }

    fn test_reviewer(mode: MockMode) -> (Reviewer<MockBackend>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (Reviewer::new(MockBackend::new(mode), dir.path()), dir)
    }

    #[test]
    fn test_greeting_matches_all_words_any_casing() {
        for prompt in ["hi", "Hello", "HEY", "  yo  ", "\thi\n"] {
            assert_eq!(greeting_reply(prompt), Some(GREETING_REPLY), "{:?}", prompt);
        }
    }

    #[test]
    fn test_greeting_rejects_non_greetings() {
        for prompt in ["", "hiya", "hello there", "summarize this"] {
            assert_eq!(greeting_reply(prompt), None, "{:?}", prompt);
        }
    }

    #[test]
    fn test_instruction_without_context() {
        let instruction = build_instruction("summarize this", "");
        assert!(instruction.starts_with("summarize this."));
        assert!(instruction.contains("3-5 sentences"));
        assert!(!instruction.contains("PDF Content"));
    }

    #[test]
    fn test_instruction_with_context() {
        let instruction = build_instruction("summarize this", "Lorem ipsum.");
        assert!(instruction.starts_with("Analyze the following PDF content and summarize this."));
        assert!(instruction.contains("3-5 sentences"));
        assert!(instruction.ends_with("PDF Content:\nLorem ipsum."));
    }

    #[tokio::test]
    async fn test_review_returns_backend_answer() {
        let (reviewer, _dir) = test_reviewer(MockMode::Reply("This contract covers X, Y, Z."));
        let reply = reviewer.review("summarize this", "/uploads/missing.pdf").await;
        assert_eq!(reply.message, "This contract covers X, Y, Z.");
        assert!(!reply.degraded);
        assert_eq!(reviewer.backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_completion_degrades_to_fallback() {
        let (reviewer, _dir) = test_reviewer(MockMode::Fail);
        let reply = reviewer.review("summarize this", "/uploads/missing.pdf").await;
        assert_eq!(reply.message, FALLBACK_MESSAGE);
        assert!(reply.degraded);
    }

    #[tokio::test]
    async fn test_empty_completion_degrades_to_placeholder() {
        let (reviewer, _dir) = test_reviewer(MockMode::Empty);
        let reply = reviewer.review("summarize this", "/uploads/missing.pdf").await;
        assert_eq!(reply.message, NO_ANSWER_MESSAGE);
        assert!(reply.degraded);
    }

    #[tokio::test]
    async fn test_traversal_paths_resolve_to_no_context() {
        let (reviewer, _dir) = test_reviewer(MockMode::Reply("ok"));
        assert!(reviewer.resolve_upload("/uploads/../secrets.pdf").is_none());
        assert!(reviewer.resolve_upload("/elsewhere/file.pdf").is_none());
        // Still answers, just without document context.
        let reply = reviewer.review("summarize this", "/uploads/../secrets.pdf").await;
        assert_eq!(reply.message, "ok");
    }
}
