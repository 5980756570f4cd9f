use std::time::{Duration, Instant};

use ratatui::style::Color;
use tracing::trace;

use super::state::PromptState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "ease-in" | "easein" => Some(Easing::EaseIn),
            "ease-out" | "easeout" => Some(Easing::EaseOut),
            "ease-in-out" | "easeinout" | "ease" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PromptAnimation {
    pub duration: Duration,
    pub easing: Easing,
}

impl PromptAnimation {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Jump straight to the target state.
    pub fn none() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

impl Default for PromptAnimation {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION, Easing::default())
    }
}

/// An in-flight move of the prompt between two progress values, where 0 is
/// fully normal and 1 is fully floating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    started: Instant,
    animation: PromptAnimation,
}

impl Transition {
    pub fn new(from: f64, to: f64, started: Instant, animation: PromptAnimation) -> Self {
        Self {
            from: from.clamp(0.0, 1.0),
            to: to.clamp(0.0, 1.0),
            started,
            animation,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.animation.is_instant() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let linear = elapsed.as_secs_f64() / self.animation.duration.as_secs_f64();
        let eased = self.animation.easing.apply(linear);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.animation.duration
    }
}

/// Owns the derived prompt state of a single field and the transition that
/// moves it on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptTracker {
    state: PromptState,
    transition: Option<Transition>,
}

impl PromptTracker {
    /// The first state is settled immediately, without animating.
    pub fn new(text: &str, focused: bool) -> Self {
        Self {
            state: PromptState::resolve(text, focused),
            transition: None,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Recomputes the state from text and focus. Returns the `(from, to)` pair
    /// when the state changed; an unchanged state leaves any running
    /// transition untouched.
    pub fn sync(
        &mut self,
        text: &str,
        focused: bool,
        now: Instant,
        animation: PromptAnimation,
    ) -> Option<(PromptState, PromptState)> {
        let next = PromptState::resolve(text, focused);
        if next == self.state {
            return None;
        }
        let previous = self.state;
        let from = self.progress_at(now);
        self.state = next;
        self.transition = if animation.is_instant() {
            None
        } else {
            Some(Transition::new(from, next.progress(), now, animation))
        };
        trace!(from = %previous, to = %next, "prompt transition");
        Some((previous, next))
    }

    pub fn progress_at(&self, now: Instant) -> f64 {
        match &self.transition {
            Some(transition) => transition.progress_at(now),
            None => self.state.progress(),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .as_ref()
            .map(|transition| !transition.is_finished_at(now))
            .unwrap_or(false)
    }

    /// True from the moment the state changes until [`settle`](Self::settle)
    /// drops the transition, including after it has finished running. The
    /// frame at the final progress still has to be drawn.
    pub fn has_transition(&self) -> bool {
        self.transition.is_some()
    }

    /// Drops a transition that has run its course.
    pub fn settle(&mut self, now: Instant) {
        if self
            .transition
            .as_ref()
            .map(|transition| transition.is_finished_at(now))
            .unwrap_or(false)
        {
            self.transition = None;
        }
    }
}

/// Blends two prompt colors for the cross-fade between the normal and the
/// floating content. `t` is the floating opacity.
pub fn crossfade_color(from: Option<Color>, to: Option<Color>, t: f64) -> Option<Color> {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Some(Color::Rgb(r1, g1, b1)), Some(Color::Rgb(r2, g2, b2))) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Some(Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2)))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}
