use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Wall-clock milliseconds. Every state machine in `state` is driven by
/// values of this type so tests can move time by hand.
pub type Millis = u64;

pub fn now() -> Millis {
    web_sys::js_sys::Date::now() as Millis
}

/// Lets one call through per window; calls inside the window are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: Millis,
    window_ends: Option<Millis>,
}

impl Throttle {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            interval_ms,
            window_ends: None,
        }
    }

    pub fn try_fire(&mut self, now: Millis) -> bool {
        match self.window_ends {
            Some(end) if now < end => false,
            _ => {
                self.window_ends = Some(now + self.interval_ms);
                true
            }
        }
    }
}

/// Holds the latest value until `quiet_ms` pass without another call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce<T> {
    quiet_ms: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet_ms: Millis) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Replaces whatever was pending and restarts the quiet period.
    pub fn call(&mut self, now: Millis, value: T) {
        self.pending = Some((now + self.quiet_ms, value));
    }

    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match self.pending {
            Some((due, _)) if now >= due => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Wraps `action` so it runs at most once per `interval_ms` as measured by `clock`.
pub fn throttle<A, F, C>(mut action: F, interval_ms: Millis, clock: C) -> impl FnMut(A)
where
    F: FnMut(A),
    C: Fn() -> Millis,
{
    let mut gate = Throttle::new(interval_ms);
    move |arg: A| {
        if gate.try_fire(clock()) {
            action(arg);
        }
    }
}

/// Browser-timer debounce: only the last call of a burst reaches `action`.
pub fn debounce<A, F>(action: F, quiet_ms: u32) -> impl FnMut(A)
where
    A: 'static,
    F: FnMut(A) + 'static,
{
    let pending = Rc::new(RefCell::new(Debounce::new(Millis::from(quiet_ms))));
    let action = Rc::new(RefCell::new(action));
    let timer: Rc<RefCell<Option<Timeout>>> = Rc::default();
    move |arg: A| {
        pending.borrow_mut().call(now(), arg);
        let pending = pending.clone();
        let action = action.clone();
        let timeout = Timeout::new(quiet_ms, move || {
            let value = {
                let mut pending = pending.borrow_mut();
                let due = pending.next_deadline();
                due.and_then(|due| pending.poll(now().max(due)))
            };
            if let Some(value) = value {
                (&mut *action.borrow_mut())(value);
            }
        });
        // Dropping the previous Timeout cancels it.
        *timer.borrow_mut() = Some(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn throttle_fires_first_call_and_drops_the_rest_of_the_window() {
        let mut gate = Throttle::new(10);
        assert!(gate.try_fire(100));
        assert!(!gate.try_fire(101));
        assert!(!gate.try_fire(109));
        assert!(gate.try_fire(110));
    }

    #[test]
    fn throttle_wrapper_uses_the_supplied_clock() {
        let clock = Rc::new(Cell::new(0));
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut wrapped = {
            let clock = clock.clone();
            let hits = hits.clone();
            throttle(move |n: u32| hits.borrow_mut().push(n), 16, move || clock.get())
        };

        for (t, n) in [(0, 1), (5, 2), (15, 3), (16, 4), (20, 5), (40, 6)] {
            clock.set(t);
            wrapped(n);
        }

        assert_eq!(*hits.borrow(), vec![1, 4, 6]);
    }

    #[test]
    fn debounce_only_releases_the_last_call_of_a_burst() {
        let mut pending = Debounce::new(300);
        pending.call(0, "a");
        pending.call(100, "b");
        pending.call(250, "c");

        assert_eq!(pending.poll(500), None);
        assert_eq!(pending.next_deadline(), Some(550));
        assert_eq!(pending.poll(550), Some("c"));
        assert_eq!(pending.poll(10_000), None);
    }

    #[test]
    fn debounce_never_fires_while_calls_keep_arriving() {
        let mut pending = Debounce::new(50);
        for t in (0..1_000).step_by(40) {
            pending.call(t, t);
            assert_eq!(pending.poll(t), None);
        }
        pending.cancel();
        assert_eq!(pending.poll(5_000), None);
    }
}
