use std::time::{Duration, Instant};

use ratatui::style::Color;

use crate::prompt::{Easing, PromptAnimation, PromptState, PromptTracker, Transition, crossfade_color};

fn animation() -> PromptAnimation {
    PromptAnimation::new(Duration::from_millis(200), Easing::Linear)
}

#[test]
fn easing_curves_pin_endpoints() {
    for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        assert_eq!(easing.apply(-3.0), 0.0);
    }
    assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-9);
    assert!(Easing::EaseIn.apply(0.25) < 0.25);
    assert!(Easing::EaseOut.apply(0.25) > 0.25);
}

#[test]
fn easing_parses_css_names() {
    assert_eq!(Easing::parse("ease-in-out"), Some(Easing::EaseInOut));
    assert_eq!(Easing::parse("Linear"), Some(Easing::Linear));
    assert_eq!(Easing::parse("bounce"), None);
}

#[test]
fn transition_interpolates_over_duration() {
    let start = Instant::now();
    let transition = Transition::new(0.0, 1.0, start, animation());
    assert_eq!(transition.progress_at(start), 0.0);
    let halfway = transition.progress_at(start + Duration::from_millis(100));
    assert!((halfway - 0.5).abs() < 1e-9);
    assert_eq!(transition.progress_at(start + Duration::from_secs(1)), 1.0);
    assert!(transition.is_finished_at(start + Duration::from_millis(200)));
}

#[test]
fn tracker_starts_settled() {
    let now = Instant::now();
    let tracker = PromptTracker::new("prefilled", false);
    assert_eq!(tracker.state(), PromptState::Floating);
    assert_eq!(tracker.progress_at(now), 1.0);
    assert!(!tracker.is_animating(now));
}

#[test]
fn tracker_animates_only_on_change() {
    let start = Instant::now();
    let mut tracker = PromptTracker::new("", false);

    assert_eq!(tracker.sync("", false, start, animation()), None);
    assert!(!tracker.is_animating(start));

    let change = tracker.sync("", true, start, animation());
    assert_eq!(change, Some((PromptState::Normal, PromptState::Floating)));
    assert!(tracker.is_animating(start + Duration::from_millis(50)));

    // Typing while focused keeps the state and the running transition.
    assert_eq!(tracker.sync("a", true, start + Duration::from_millis(50), animation()), None);
    let mid = tracker.progress_at(start + Duration::from_millis(100));
    assert!((mid - 0.5).abs() < 1e-9);

    let done = start + Duration::from_millis(250);
    assert_eq!(tracker.progress_at(done), 1.0);
    tracker.settle(done);
    assert!(!tracker.is_animating(done));
}

#[test]
fn finished_transition_is_held_until_settled() {
    let start = Instant::now();
    let mut tracker = PromptTracker::new("", false);
    assert!(!tracker.has_transition());

    tracker.sync("", true, start, animation());
    let done = start + Duration::from_millis(400);
    assert!(!tracker.is_animating(done));
    assert!(tracker.has_transition(), "final frame not drawn yet");

    tracker.settle(done);
    assert!(!tracker.has_transition());
    assert_eq!(tracker.progress_at(done), 1.0);
}

#[test]
fn reversing_mid_flight_starts_from_visual_progress() {
    let start = Instant::now();
    let mut tracker = PromptTracker::new("", false);
    tracker.sync("", true, start, animation());
    let reverse_at = start + Duration::from_millis(100);
    tracker.sync("", false, reverse_at, animation());
    assert_eq!(tracker.state(), PromptState::Normal);
    assert!((tracker.progress_at(reverse_at) - 0.5).abs() < 1e-9);
    assert_eq!(tracker.progress_at(reverse_at + Duration::from_millis(200)), 0.0);
}

#[test]
fn instant_animation_jumps_to_target() {
    let now = Instant::now();
    let mut tracker = PromptTracker::new("", false);
    tracker.sync("x", false, now, PromptAnimation::none());
    assert_eq!(tracker.progress_at(now), 1.0);
    assert!(!tracker.is_animating(now));
}

#[test]
fn crossfade_blends_rgb_and_switches_named_colors() {
    let from = Some(Color::Rgb(0, 0, 0));
    let to = Some(Color::Rgb(200, 100, 50));
    assert_eq!(crossfade_color(from, to, 0.5), Some(Color::Rgb(100, 50, 25)));
    assert_eq!(crossfade_color(from, to, 1.0), to);

    let named_from = Some(Color::DarkGray);
    let named_to = Some(Color::Cyan);
    assert_eq!(crossfade_color(named_from, named_to, 0.4), named_from);
    assert_eq!(crossfade_color(named_from, named_to, 0.6), named_to);
}
