//! Transient status notices.
//!
//! A front end shows at most one notice at a time ("Submitting…", "Proposal
//! submitted", "Approval failed: …"). Posting replaces the current notice;
//! a notice with a time-to-live is cleared by a scheduled task once it
//! expires, unless a newer notice has replaced it in the meantime.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default lifetime of a success notice.
pub const SUCCESS_TTL: Duration = Duration::from_secs(2);

/// Default lifetime of an error notice.
pub const ERROR_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Expiry per notice kind. Pending notices never expire on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTtls {
    pub success: Duration,
    pub error: Duration,
}

impl Default for NoticeTtls {
    fn default() -> Self {
        Self {
            success: SUCCESS_TTL,
            error: ERROR_TTL,
        }
    }
}

/// Holder of the single visible notice.
#[derive(Clone, Default)]
pub struct NoticeBoard {
    inner: Arc<Mutex<BoardState>>,
    ttls: NoticeTtls,
}

#[derive(Default)]
struct BoardState {
    current: Option<Notice>,
    generation: u64,
}

impl NoticeBoard {
    pub fn new(ttls: NoticeTtls) -> Self {
        Self {
            inner: Arc::default(),
            ttls,
        }
    }

    /// Replace the current notice. With a `ttl`, schedule its removal.
    ///
    /// Must be called from within a tokio runtime when `ttl` is set.
    pub fn post(&self, kind: NoticeKind, message: impl Into<String>, ttl: Option<Duration>) {
        let generation = {
            let mut state = self.inner.lock().unwrap();
            state.generation += 1;
            state.current = Some(Notice {
                kind,
                message: message.into(),
            });
            state.generation
        };

        if let Some(ttl) = ttl {
            let inner = self.inner.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                let mut state = inner.lock().unwrap();
                // A newer notice owns the board now.
                if state.generation == generation {
                    state.current = None;
                }
            });
        }
    }

    pub fn pending(&self, message: impl Into<String>) {
        self.post(NoticeKind::Pending, message, None);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.post(NoticeKind::Success, message, Some(self.ttls.success));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NoticeKind::Error, message, Some(self.ttls.error));
    }

    /// Visible notice, if any.
    pub fn current(&self) -> Option<Notice> {
        self.inner.lock().unwrap().current.clone()
    }

    pub fn dismiss(&self) {
        let mut state = self.inner.lock().unwrap();
        state.generation += 1;
        state.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_notice_expires() {
        let board = NoticeBoard::default();
        board.success("Proposal submitted");
        assert_eq!(board.current().unwrap().kind, NoticeKind::Success);

        advance(1_900).await;
        assert!(board.current().is_some());

        advance(200).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_notice_lasts_longer() {
        let board = NoticeBoard::default();
        board.error("Submission failed");

        advance(2_500).await;
        assert!(board.current().is_some());

        advance(600).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_notice_does_not_expire() {
        let board = NoticeBoard::default();
        board.pending("Submitting…");

        advance(60_000).await;
        assert_eq!(board.current().unwrap().message, "Submitting…");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notice_survives_older_expiry() {
        let board = NoticeBoard::default();
        board.success("first");

        advance(1_500).await;
        board.pending("second");

        advance(1_000).await;
        assert_eq!(board.current().unwrap().message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ttls() {
        let board = NoticeBoard::new(NoticeTtls {
            success: Duration::from_millis(100),
            error: Duration::from_millis(100),
        });
        board.success("quick");

        advance(150).await;
        assert!(board.current().is_none());
    }

    #[test]
    fn test_dismiss() {
        let board = NoticeBoard::default();
        board.pending("working");
        board.dismiss();
        assert!(board.current().is_none());
    }
}
