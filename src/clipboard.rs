// src/clipboard.rs

use crate::constants::COPY_ACK_MILLIS;
use crate::errors::{ContentError, ContentResult};
use copypasta::{ClipboardContext, ClipboardProvider};
use std::time::{Duration, Instant};

/// Somewhere copied text can be written.
pub trait ClipboardSink {
    fn set_contents(&mut self, text: String) -> ContentResult<()>;
}

/// The system clipboard. The context is opened lazily on first copy.
#[derive(Default)]
pub struct SystemClipboard {
    ctx: Option<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_contents(&mut self, text: String) -> ContentResult<()> {
        if self.ctx.is_none() {
            let ctx = ClipboardContext::new()
                .map_err(|e| ContentError::clipboard_error(e.to_string()))?;
            self.ctx = Some(ctx);
        }

        match self.ctx.as_mut() {
            Some(ctx) => ctx
                .set_contents(text)
                .map_err(|e| ContentError::clipboard_error(e.to_string())),
            None => Err(ContentError::clipboard_error("clipboard unavailable")),
        }
    }
}

/// Copy action with its transient "copied" acknowledgment.
#[derive(Debug, Clone)]
pub struct CopyAction {
    ack_until: Option<Instant>,
    duration: Duration,
}

impl Default for CopyAction {
    fn default() -> Self {
        Self {
            ack_until: None,
            duration: Duration::from_millis(COPY_ACK_MILLIS),
        }
    }
}

impl CopyAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the raw Markdown `source`. On success the acknowledgment is
    /// (re)armed for two seconds from `now`; on failure it is logged and the
    /// acknowledgment stays unset.
    pub fn copy<S: ClipboardSink + ?Sized>(&mut self, sink: &mut S, source: &str, now: Instant) -> bool {
        match sink.set_contents(source.to_string()) {
            Ok(()) => {
                self.ack_until = Some(now + self.duration);
                true
            }
            Err(e) => {
                log::error!("Failed to copy text: {}", e);
                false
            }
        }
    }

    pub fn is_acknowledged(&self, now: Instant) -> bool {
        matches!(self.ack_until, Some(until) if now < until)
    }

    /// Drops an expired acknowledgment. Called on every tick.
    pub fn expire(&mut self, now: Instant) {
        if !self.is_acknowledged(now) {
            self.ack_until = None;
        }
    }

    pub fn clear(&mut self) {
        self.ack_until = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Default)]
    pub(crate) struct MemoryClipboard {
        pub(crate) contents: Option<String>,
        pub(crate) fail: bool,
    }

    impl ClipboardSink for MemoryClipboard {
        fn set_contents(&mut self, text: String) -> ContentResult<()> {
            if self.fail {
                return Err(ContentError::clipboard_error("no display"));
            }
            self.contents = Some(text);
            Ok(())
        }
    }

    #[test]
    fn test_copies_raw_source_and_acknowledges_for_two_seconds() {
        let mut sink = MemoryClipboard::default();
        let mut action = CopyAction::new();
        let t0 = Instant::now();

        assert!(action.copy(&mut sink, "## Hook\n- x", t0));
        assert_eq!(sink.contents.as_deref(), Some("## Hook\n- x"));

        assert!(action.is_acknowledged(t0));
        assert!(action.is_acknowledged(t0 + Duration::from_millis(1999)));
        assert!(!action.is_acknowledged(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_recopy_restarts_window() {
        let mut sink = MemoryClipboard::default();
        let mut action = CopyAction::new();
        let t0 = Instant::now();

        action.copy(&mut sink, "a", t0);
        action.copy(&mut sink, "a", t0 + Duration::from_millis(1500));
        assert!(action.is_acknowledged(t0 + Duration::from_millis(3000)));
        assert!(!action.is_acknowledged(t0 + Duration::from_millis(3500)));
    }

    #[test]
    fn test_failed_copy_leaves_ack_unset() {
        let mut sink = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let mut action = CopyAction::new();
        let t0 = Instant::now();

        assert!(!action.copy(&mut sink, "text", t0));
        assert!(!action.is_acknowledged(t0));
    }

    #[test]
    fn test_expire_resets_after_window() {
        let mut sink = MemoryClipboard::default();
        let mut action = CopyAction::new();
        let t0 = Instant::now();

        action.copy(&mut sink, "a", t0);
        action.expire(t0 + Duration::from_millis(500));
        assert!(action.is_acknowledged(t0 + Duration::from_millis(500)));
        action.expire(t0 + Duration::from_millis(2100));
        assert!(!action.is_acknowledged(t0 + Duration::from_millis(100)));
    }
}
