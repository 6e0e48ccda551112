//! # Room Transitions
//!
//! A two-state machine (idle, transitioning) that masks a room change
//! behind a timed visual effect. The room swap itself is a deferred payload
//! handed back exactly once, at the midpoint of the effect, so the swap
//! happens while the screen is fully covered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Fade to black and back
    Fade,
    /// Slide the old room out and the new one in
    Slide,
    /// Swap on the next update with no effect
    Instant,
}

/// Timed transition holding a deferred completion payload.
///
/// # Examples
///
/// ```
/// use dungeon_heroes::{TransitionKind, TransitionManager};
///
/// let mut transition = TransitionManager::new();
/// assert!(transition.start(TransitionKind::Fade, 1.0, "swap rooms"));
///
/// assert_eq!(transition.update(0.25), None);
/// assert_eq!(transition.update(0.25), Some("swap rooms"));
/// assert_eq!(transition.update(0.25), None);
/// assert!(transition.is_active());
///
/// transition.update(0.25);
/// assert!(!transition.is_active());
/// ```
#[derive(Debug, Clone)]
pub struct TransitionManager<P> {
    kind: TransitionKind,
    duration: f32,
    elapsed: f32,
    active: bool,
    payload: Option<P>,
}

impl<P> Default for TransitionManager<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TransitionManager<P> {
    pub fn new() -> Self {
        Self {
            kind: TransitionKind::Fade,
            duration: 0.0,
            elapsed: 0.0,
            active: false,
            payload: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Starts a transition. Returns false, dropping `payload`, if one is already running.
    pub fn start(&mut self, kind: TransitionKind, duration: f32, payload: P) -> bool {
        if self.active {
            log::debug!("Ignoring transition start while one is active");
            return false;
        }
        self.kind = kind;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.active = true;
        self.payload = Some(payload);
        true
    }

    /// Advances the transition by `dt` seconds.
    ///
    /// Returns the payload on the update where progress first reaches the
    /// midpoint, and never again for this transition. The machine goes back
    /// to idle once the full duration has elapsed.
    pub fn update(&mut self, dt: f32) -> Option<P> {
        if !self.active {
            return None;
        }
        self.elapsed += dt.max(0.0);

        let instant = self.kind == TransitionKind::Instant;
        let progress = self.progress();
        let payload = if instant || progress >= 0.5 {
            self.payload.take()
        } else {
            None
        };

        if instant || progress >= 1.0 {
            self.active = false;
        }
        payload
    }

    /// Fraction of the transition completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if !self.active && self.elapsed == 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Alpha of the fade overlay: rising to opaque at the midpoint, then clearing.
    pub fn overlay_alpha(&self) -> u8 {
        if !self.active || self.kind != TransitionKind::Fade {
            return 0;
        }
        let p = self.progress();
        let alpha = if p <= 0.5 {
            255.0 * 2.0 * p
        } else {
            255.0 * (2.0 - 2.0 * p)
        };
        alpha.round().clamp(0.0, 255.0) as u8
    }

    /// Horizontal offset of a slide, in multiples of the view width.
    pub fn slide_offset(&self) -> f32 {
        if !self.active || self.kind != TransitionKind::Slide {
            return 0.0;
        }
        let p = self.progress();
        if p <= 0.5 {
            -2.0 * p
        } else {
            2.0 - 2.0 * p
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    type Callback = Box<dyn FnOnce()>;

    fn counting_callback(counter: &Rc<Cell<u32>>) -> Callback {
        let counter = Rc::clone(counter);
        Box::new(move || counter.set(counter.get() + 1))
    }

    fn drive(transition: &mut TransitionManager<Callback>, dt: f32, steps: usize) {
        for _ in 0..steps {
            if let Some(callback) = transition.update(dt) {
                callback();
            }
        }
    }

    #[test]
    fn test_callback_fires_exactly_once() {
        let calls = Rc::new(Cell::new(0));
        let mut transition = TransitionManager::new();
        assert!(transition.start(TransitionKind::Fade, 0.8, counting_callback(&calls)));

        drive(&mut transition, 0.1, 20);
        assert_eq!(calls.get(), 1);
        assert!(!transition.is_active());
    }

    #[test]
    fn test_callback_waits_for_midpoint() {
        let calls = Rc::new(Cell::new(0));
        let mut transition = TransitionManager::new();
        transition.start(TransitionKind::Fade, 1.0, counting_callback(&calls));

        drive(&mut transition, 0.1, 4);
        assert_eq!(calls.get(), 0);
        drive(&mut transition, 0.1, 2);
        assert_eq!(calls.get(), 1);
        assert!(transition.is_active());
    }

    #[test]
    fn test_single_large_step_completes() {
        let calls = Rc::new(Cell::new(0));
        let mut transition = TransitionManager::new();
        transition.start(TransitionKind::Slide, 0.8, counting_callback(&calls));

        drive(&mut transition, 5.0, 1);
        assert_eq!(calls.get(), 1);
        assert!(!transition.is_active());
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut transition = TransitionManager::new();

        assert!(transition.start(TransitionKind::Fade, 1.0, counting_callback(&first)));
        drive(&mut transition, 0.2, 1);
        assert!(!transition.start(TransitionKind::Instant, 0.0, counting_callback(&second)));
        assert_eq!(transition.kind(), TransitionKind::Fade);
        assert!((transition.progress() - 0.2).abs() < 1e-5);

        drive(&mut transition, 0.2, 10);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_instant_and_zero_duration() {
        let mut instant = TransitionManager::new();
        instant.start(TransitionKind::Instant, 0.8, 7);
        assert_eq!(instant.update(0.0), Some(7));
        assert!(!instant.is_active());

        let mut zero = TransitionManager::new();
        zero.start(TransitionKind::Fade, 0.0, 9);
        assert_eq!(zero.progress(), 1.0);
        assert_eq!(zero.update(0.016), Some(9));
        assert!(!zero.is_active());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut transition = TransitionManager::new();
        transition.start(TransitionKind::Fade, 0.8, ());
        let mut last = transition.progress();
        while transition.is_active() {
            transition.update(0.05);
            let progress = transition.progress();
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
    }

    #[test]
    fn test_fade_alpha_curve() {
        let mut transition = TransitionManager::new();
        transition.start(TransitionKind::Fade, 1.0, ());
        assert_eq!(transition.overlay_alpha(), 0);

        transition.update(0.25);
        assert_eq!(transition.overlay_alpha(), 128);
        transition.update(0.25);
        assert_eq!(transition.overlay_alpha(), 255);
        transition.update(0.25);
        assert_eq!(transition.overlay_alpha(), 128);
    }

    #[test]
    fn test_idle_update_does_nothing() {
        let mut transition: TransitionManager<u8> = TransitionManager::new();
        assert_eq!(transition.update(1.0), None);
        assert_eq!(transition.progress(), 0.0);
        assert_eq!(transition.overlay_alpha(), 0);
    }
}
