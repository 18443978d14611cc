//! Pure derivations from the page's scroll position: progress bar width,
//! navbar show/hide, hero parallax and the decorative wheel.

/// At or above this offset the navbar stays hidden.
pub const NAVBAR_FLOOR_PX: f64 = 150.0;
/// Scroll deltas no larger than this leave the navbar alone.
pub const NAVBAR_DEADBAND_PX: f64 = 10.0;
pub const PARALLAX_FACTOR: f64 = 0.5;
pub const WHEEL_DEGREES_PER_PX: f64 = 0.5;
pub const DEFAULT_NAVBAR_HEIGHT_PX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

pub fn progress_percent(viewport: &Viewport) -> f64 {
    let scrollable = viewport.document_height - viewport.viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }
    (viewport.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn parallax_offset(viewport: &Viewport) -> Option<f64> {
    (viewport.scroll_top < viewport.viewport_height).then(|| viewport.scroll_top * PARALLAX_FACTOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarVisibility {
    #[default]
    Hidden,
    Visible,
}

pub fn next_navbar_state(current: NavbarVisibility, last_offset: f64, scroll_top: f64) -> NavbarVisibility {
    if scroll_top <= NAVBAR_FLOOR_PX {
        NavbarVisibility::Hidden
    } else if scroll_top > last_offset + NAVBAR_DEADBAND_PX {
        NavbarVisibility::Hidden
    } else if scroll_top < last_offset - NAVBAR_DEADBAND_PX {
        NavbarVisibility::Visible
    } else {
        current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavbarTracker {
    state: NavbarVisibility,
    last_offset: f64,
}

impl NavbarTracker {
    pub fn observe(&mut self, scroll_top: f64) -> NavbarVisibility {
        self.state = next_navbar_state(self.state, self.last_offset, scroll_top);
        self.last_offset = scroll_top;
        self.state
    }

    pub fn state(&self) -> NavbarVisibility {
        self.state
    }
}

/// Wheel rotation sampled once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelRotation {
    last_offset: f64,
    degrees: f64,
    frame_pending: bool,
}

impl WheelRotation {
    /// True when the caller must schedule a frame; false if one is already queued.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    pub fn on_frame(&mut self, scroll_top: f64) -> f64 {
        self.degrees += (scroll_top - self.last_offset) * WHEEL_DEGREES_PER_PX;
        self.last_offset = scroll_top;
        self.frame_pending = false;
        self.degrees
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// A throttled viewport sample.
    Scrolled(Viewport),
    /// Every raw scroll event; the wheel batches these into animation frames.
    WheelMoved,
    AnimationFrame { scroll_top: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffects {
    pub progress: f64,
    pub navbar: NavbarVisibility,
    pub parallax: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollUpdate {
    Effects(ScrollEffects),
    WheelFrame { needed: bool },
    Wheel { degrees: f64 },
}

/// Owns the scroll state for one page session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTracker {
    navbar: NavbarTracker,
    wheel: WheelRotation,
}

impl ScrollTracker {
    pub fn handle(&mut self, event: ScrollEvent) -> ScrollUpdate {
        match event {
            ScrollEvent::Scrolled(viewport) => ScrollUpdate::Effects(ScrollEffects {
                progress: progress_percent(&viewport),
                navbar: self.navbar.observe(viewport.scroll_top),
                parallax: parallax_offset(&viewport),
            }),
            ScrollEvent::WheelMoved => ScrollUpdate::WheelFrame {
                needed: self.wheel.request_frame(),
            },
            ScrollEvent::AnimationFrame { scroll_top } => ScrollUpdate::Wheel {
                degrees: self.wheel.on_frame(scroll_top),
            },
        }
    }

    pub fn navbar(&self) -> NavbarVisibility {
        self.navbar.state()
    }
}

/// Where to scroll so a section's top clears the fixed navbar.
pub fn section_scroll_target(section_top: f64, navbar_height: Option<f64>) -> f64 {
    section_top - navbar_height.unwrap_or(DEFAULT_NAVBAR_HEIGHT_PX)
}

/// Quadratic ease-in-out: `elapsed` into a `duration`-long move of `distance` from `start`.
pub fn ease_in_out_quad(elapsed: f64, start: f64, distance: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return start + distance;
    }
    let mut t = elapsed.clamp(0.0, duration) / (duration / 2.0);
    if t < 1.0 {
        return distance / 2.0 * t * t + start;
    }
    t -= 1.0;
    -distance / 2.0 * (t * (t - 2.0) - 1.0) + start
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn viewport(scroll_top: f64) -> Viewport {
        Viewport {
            scroll_top,
            document_height: 3_000.0,
            viewport_height: 1_000.0,
        }
    }

    #[test]
    fn progress_is_bounded_and_monotonic() {
        assert_eq!(progress_percent(&viewport(0.0)), 0.0);
        assert_eq!(progress_percent(&viewport(1_000.0)), 50.0);
        assert_eq!(progress_percent(&viewport(5_000.0)), 100.0);

        let mut previous = 0.0;
        for step in 0..=300 {
            let p = progress_percent(&viewport(step as f64 * 10.0));
            assert!((0.0..=100.0).contains(&p));
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn progress_on_unscrollable_document_is_zero() {
        let short = Viewport {
            scroll_top: 0.0,
            document_height: 800.0,
            viewport_height: 800.0,
        };
        assert_eq!(progress_percent(&short), 0.0);
        assert_eq!(
            progress_percent(&Viewport {
                document_height: 500.0,
                ..short
            }),
            0.0
        );
    }

    #[test]
    fn navbar_hysteresis() {
        use NavbarVisibility::*;

        assert_eq!(next_navbar_state(Visible, 400.0, 450.0), Hidden);
        assert_eq!(next_navbar_state(Hidden, 450.0, 400.0), Visible);
        assert_eq!(next_navbar_state(Visible, 400.0, 410.0), Visible);
        assert_eq!(next_navbar_state(Hidden, 400.0, 390.0), Hidden);
        assert_eq!(next_navbar_state(Visible, 400.0, 150.0), Hidden);
        assert_eq!(next_navbar_state(Visible, 100.0, 120.0), Hidden);
    }

    #[test]
    fn navbar_tracker_updates_last_offset_every_sample() {
        let mut tracker = NavbarTracker::default();
        assert_eq!(tracker.observe(1_000.0), NavbarVisibility::Hidden);
        // Small steps up never cross the deadband on their own.
        for top in [995.0, 990.0, 985.0] {
            assert_eq!(tracker.observe(top), NavbarVisibility::Hidden);
        }
        assert_eq!(tracker.observe(960.0), NavbarVisibility::Visible);
        assert_eq!(tracker.observe(965.0), NavbarVisibility::Visible);
        assert_eq!(tracker.observe(100.0), NavbarVisibility::Hidden);
    }

    #[test]
    fn parallax_stops_below_the_fold() {
        assert_eq!(parallax_offset(&viewport(200.0)), Some(100.0));
        assert_eq!(parallax_offset(&viewport(1_000.0)), None);
    }

    #[test]
    fn wheel_only_queues_one_frame_and_tracks_net_scroll() {
        let mut tracker = ScrollTracker::default();
        assert_eq!(
            tracker.handle(ScrollEvent::WheelMoved),
            ScrollUpdate::WheelFrame { needed: true }
        );
        assert_eq!(
            tracker.handle(ScrollEvent::WheelMoved),
            ScrollUpdate::WheelFrame { needed: false }
        );

        assert_eq!(
            tracker.handle(ScrollEvent::AnimationFrame { scroll_top: 200.0 }),
            ScrollUpdate::Wheel { degrees: 100.0 }
        );
        tracker.handle(ScrollEvent::WheelMoved);
        assert_eq!(
            tracker.handle(ScrollEvent::AnimationFrame { scroll_top: 50.0 }),
            ScrollUpdate::Wheel { degrees: 25.0 }
        );
    }

    #[test]
    fn wheel_reaches_final_offset_when_the_sample_is_throttled() {
        let mut tracker = ScrollTracker::default();
        let mut gate = crate::utils::timing::Throttle::new(10);

        // Two scroll events 4 ms apart: the second sample is dropped.
        let mut frames = 0;
        for (now, top) in [(0, 100.0), (4, 180.0)] {
            if gate.try_fire(now) {
                tracker.handle(ScrollEvent::Scrolled(viewport(top)));
            }
            if tracker.handle(ScrollEvent::WheelMoved) == (ScrollUpdate::WheelFrame { needed: true }) {
                frames += 1;
            }
        }
        assert_eq!(frames, 1);

        assert_eq!(
            tracker.handle(ScrollEvent::AnimationFrame { scroll_top: 180.0 }),
            ScrollUpdate::Wheel { degrees: 90.0 }
        );
        assert_eq!(
            tracker.handle(ScrollEvent::WheelMoved),
            ScrollUpdate::WheelFrame { needed: true }
        );
    }

    #[test]
    fn section_target_clears_navbar() {
        assert_eq!(section_scroll_target(900.0, Some(64.0)), 836.0);
        assert_eq!(section_scroll_target(900.0, None), 820.0);
    }

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_in_out_quad(0.0, 100.0, 400.0, 1_000.0), 100.0);
        assert_eq!(ease_in_out_quad(500.0, 100.0, 400.0, 1_000.0), 300.0);
        assert_eq!(ease_in_out_quad(1_000.0, 100.0, 400.0, 1_000.0), 500.0);
        assert_eq!(ease_in_out_quad(2_000.0, 100.0, 400.0, 0.0), 500.0);
    }
}
