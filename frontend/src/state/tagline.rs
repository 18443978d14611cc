use crate::utils::timing::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaglineTiming {
    pub interval_ms: Millis,
    pub exit_ms: Millis,
    pub resume_delay_ms: Millis,
}

impl Default for TaglineTiming {
    fn default() -> Self {
        Self {
            interval_ms: 4_000,
            exit_ms: 400,
            resume_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatorState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Showing { next_tick: Millis },
    Exiting { advance_at: Millis, next_tick: Millis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaglineEvent {
    Start,
    Stop,
    VisibilityChanged { hidden: bool },
    Tick,
}

/// Cross-fading carousel over a fixed, non-empty list of taglines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaglineRotator {
    taglines: Vec<String>,
    index: usize,
    displayed: usize,
    phase: Phase,
    start_at: Option<Millis>,
    timing: TaglineTiming,
}

impl TaglineRotator {
    /// `None` for an empty list; there would be nothing to rotate.
    pub fn new(taglines: Vec<String>, timing: TaglineTiming) -> Option<Self> {
        if taglines.is_empty() {
            return None;
        }
        Some(Self {
            taglines,
            index: 0,
            displayed: 0,
            phase: Phase::Stopped,
            start_at: None,
            timing,
        })
    }

    pub fn handle(&mut self, event: TaglineEvent, now: Millis) {
        match event {
            TaglineEvent::Start => self.start(now),
            TaglineEvent::Stop => self.stop(),
            TaglineEvent::VisibilityChanged { hidden: true } => self.stop(),
            TaglineEvent::VisibilityChanged { hidden: false } => {
                self.schedule_start(now + self.timing.resume_delay_ms)
            }
            TaglineEvent::Tick => self.poll(now),
        }
    }

    /// Shows the first tagline and begins ticking. No-op while running.
    /// The rotation index is left alone, so the next advance continues from it.
    pub fn start(&mut self, now: Millis) {
        self.start_at = None;
        if self.state() == RotatorState::Running {
            return;
        }
        self.displayed = 0;
        self.phase = Phase::Showing {
            next_tick: now + self.timing.interval_ms,
        };
    }

    /// Cancels ticking and any pending advance; the index is kept.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
        self.start_at = None;
    }

    pub fn schedule_start(&mut self, at: Millis) {
        if self.state() == RotatorState::Stopped {
            self.start_at = Some(at);
        }
    }

    pub fn poll(&mut self, now: Millis) {
        loop {
            match self.phase {
                Phase::Stopped => match self.start_at {
                    Some(at) if now >= at => self.start(at),
                    _ => return,
                },
                Phase::Showing { next_tick } if now >= next_tick => {
                    self.phase = Phase::Exiting {
                        advance_at: next_tick + self.timing.exit_ms,
                        next_tick: next_tick + self.timing.interval_ms,
                    };
                }
                Phase::Exiting {
                    advance_at,
                    next_tick,
                } if now >= advance_at => {
                    self.index = (self.index + 1) % self.taglines.len();
                    self.displayed = self.index;
                    self.phase = Phase::Showing { next_tick };
                }
                _ => return,
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        match self.phase {
            Phase::Stopped => self.start_at,
            Phase::Showing { next_tick } => Some(next_tick),
            Phase::Exiting { advance_at, .. } => Some(advance_at),
        }
    }

    pub fn state(&self) -> RotatorState {
        match self.phase {
            Phase::Stopped => RotatorState::Stopped,
            _ => RotatorState::Running,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Slot of the tagline on screen. Differs from `current_index` right
    /// after a resume, which always shows the first tagline.
    pub fn displayed_index(&self) -> usize {
        self.displayed
    }

    pub fn current(&self) -> &str {
        &self.taglines[self.displayed]
    }

    /// The tagline carries the `active` class only while fully shown.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Showing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rotator(n: usize) -> TaglineRotator {
        let taglines = (0..n).map(|i| format!("tagline {i}")).collect();
        TaglineRotator::new(taglines, TaglineTiming::default()).expect("non-empty")
    }

    #[test]
    fn empty_list_is_refused() {
        assert!(TaglineRotator::new(Vec::new(), TaglineTiming::default()).is_none());
    }

    #[test]
    fn index_follows_tick_count() {
        let mut r = rotator(4);
        r.start(0);
        assert_eq!(r.current(), "tagline 0");
        assert!(r.is_active());

        for k in 1..=9u64 {
            r.poll(k * 4_000 + 400);
            assert_eq!(r.current_index(), (k % 4) as usize);
        }
    }

    #[test]
    fn exit_transition_precedes_advance() {
        let mut r = rotator(3);
        r.start(0);
        r.poll(4_000);
        assert!(!r.is_active());
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.next_deadline(), Some(4_400));
        r.poll(4_399);
        assert_eq!(r.current_index(), 0);
        r.poll(4_400);
        assert_eq!(r.current_index(), 1);
        assert!(r.is_active());
        assert_eq!(r.next_deadline(), Some(8_000));
    }

    #[test]
    fn large_clock_jump_catches_up() {
        let mut r = rotator(4);
        r.start(0);
        r.poll(3 * 4_000 + 400);
        assert_eq!(r.current_index(), 3);
    }

    #[test]
    fn stop_during_exit_keeps_index() {
        let mut r = rotator(4);
        r.start(0);
        r.poll(4_100);
        r.handle(TaglineEvent::VisibilityChanged { hidden: true }, 4_100);
        assert_eq!(r.state(), RotatorState::Stopped);
        r.poll(60_000);
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn resume_waits_for_grace_delay() {
        let mut r = rotator(4);
        r.start(0);
        r.poll(4_400);
        r.handle(TaglineEvent::VisibilityChanged { hidden: true }, 5_000);
        r.handle(TaglineEvent::VisibilityChanged { hidden: false }, 9_000);

        r.poll(9_999);
        assert_eq!(r.state(), RotatorState::Stopped);
        r.poll(10_000);
        assert_eq!(r.state(), RotatorState::Running);
        assert_eq!(r.next_deadline(), Some(14_000));
    }

    #[test]
    fn resume_shows_first_tagline_then_continues_from_index() {
        let mut r = rotator(4);
        r.start(0);
        r.poll(2 * 4_000 + 400);
        assert_eq!(r.current(), "tagline 2");

        r.handle(TaglineEvent::VisibilityChanged { hidden: true }, 9_000);
        r.handle(TaglineEvent::VisibilityChanged { hidden: false }, 12_000);
        r.poll(13_000);
        assert_eq!(r.state(), RotatorState::Running);
        assert_eq!(r.current(), "tagline 0");
        assert_eq!(r.displayed_index(), 0);
        assert_eq!(r.current_index(), 2);

        r.poll(13_000 + 4_400);
        assert_eq!(r.current(), "tagline 3");
        assert_eq!(r.current_index(), 3);
    }

    #[test]
    fn start_is_idempotent() {
        let mut r = rotator(2);
        r.handle(TaglineEvent::Start, 0);
        r.handle(TaglineEvent::Start, 3_000);
        assert_eq!(r.next_deadline(), Some(4_000));
        r.handle(TaglineEvent::Stop, 3_500);
        r.handle(TaglineEvent::Tick, 9_000);
        assert_eq!(r.state(), RotatorState::Stopped);
    }
}
