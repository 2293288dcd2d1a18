/// A per-instance repeating timer.
///
/// The ticker never reads a clock. The host asks [`Ticker::due_at`] when to call back and
/// reports the current time on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticker {
    interval_ms: u64,
    due_at_ms: Option<u64>,
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            due_at_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_scheduled(&self) -> bool {
        self.due_at_ms.is_some()
    }

    pub fn due_at(&self) -> Option<u64> {
        self.due_at_ms
    }

    /// Arms the ticker so that it is due immediately.
    pub fn schedule(&mut self, now_ms: u64) {
        self.due_at_ms = Some(now_ms);
    }

    /// Arms the ticker one interval after `now_ms`.
    pub fn reschedule(&mut self, now_ms: u64) {
        self.due_at_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    pub fn cancel(&mut self) {
        self.due_at_ms = None;
    }

    /// Whether a scheduled tick is due at `now_ms`. Does not disarm the ticker.
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.due_at_ms.is_some_and(|due| now_ms >= due)
    }
}
