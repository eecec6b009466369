mod common;

use portfolio_core::{
    find_active_section, progress_ratio, update, Effect, Msg, Rect, ScrollSample,
    ScrollTracker, SectionRegistry,
};

use common::{frame, init_logging, mounted, sample_at, SECTION_HEIGHT, VIEWPORT_HEIGHT};

#[test]
fn progress_is_monotonic_and_bounded() {
    let document = SECTION_HEIGHT * 6.0;
    let mut previous = f64::NEG_INFINITY;
    for step in -20..=600 {
        let scroll_y = f64::from(step) * 10.0;
        let ratio = progress_ratio(scroll_y, document, VIEWPORT_HEIGHT);
        assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} at {scroll_y}");
        assert!(ratio >= previous, "ratio decreased at {scroll_y}");
        previous = ratio;
    }
    assert_eq!(progress_ratio(4000.0, document, VIEWPORT_HEIGHT), 1.0);
}

#[test]
fn unscrollable_document_has_zero_progress() {
    assert_eq!(progress_ratio(0.0, 600.0, 800.0), 0.0);
    assert_eq!(progress_ratio(10.0, 800.0, 800.0), 0.0);
}

#[test]
fn active_section_is_first_crossing_activation_line() {
    let registry = SectionRegistry::portfolio();
    assert_eq!(find_active_section(&registry, &sample_at(0.0)), Some("home"));
    // Section boundary sits exactly on the line: the earlier section wins.
    assert_eq!(find_active_section(&registry, &sample_at(700.0)), Some("home"));
    assert_eq!(find_active_section(&registry, &sample_at(701.0)), Some("skills"));
    assert_eq!(find_active_section(&registry, &sample_at(3950.0)), Some("contact"));
}

#[test]
fn unmounted_sections_are_skipped() {
    let registry = SectionRegistry::portfolio();
    let mut sample = sample_at(1000.0);
    for (id, rect) in sample.sections.iter_mut() {
        if id == "skills" {
            *rect = None;
        }
    }
    assert_eq!(find_active_section(&registry, &sample), None);
}

#[test]
fn active_section_sticks_when_nothing_crosses_the_line() {
    init_logging();
    let registry = SectionRegistry::portfolio();
    let mut tracker = ScrollTracker::new("home");
    tracker.activate();

    tracker.on_frame(&registry, &sample_at(1700.0), 16);
    assert_eq!(tracker.state().active_section_id, "experience");

    // Sections separated by a gap that contains the activation line.
    let gap = ScrollSample {
        scroll_y: 1750.0,
        viewport_height: VIEWPORT_HEIGHT,
        document_height: 4800.0,
        sections: vec![
            ("experience".to_string(), Some(Rect::new(-150.0, 50.0))),
            ("projects".to_string(), Some(Rect::new(150.0, 950.0))),
        ],
    };
    tracker.on_frame(&registry, &gap, 16);
    assert_eq!(tracker.state().active_section_id, "experience");

    let nothing_mounted = ScrollSample {
        sections: Vec::new(),
        ..gap
    };
    tracker.on_frame(&registry, &nothing_mounted, 16);
    assert_eq!(tracker.state().active_section_id, "experience");
}

#[test]
fn backdrop_switches_past_threshold() {
    init_logging();
    let (state, _) = frame(mounted(), 16, 50.0);
    assert!(!state.scroll_state().is_past_threshold);
    let (state, _) = frame(state, 32, 51.0);
    assert!(state.scroll_state().is_past_threshold);
}

#[test]
fn inactive_tracker_ignores_samples() {
    let registry = SectionRegistry::portfolio();
    let mut tracker = ScrollTracker::new("home");
    let outcome = tracker.on_frame(&registry, &sample_at(2000.0), 16);

    assert!(!outcome.changed);
    assert_eq!(tracker.state().active_section_id, "home");
    assert_eq!(tracker.state().progress_ratio, 0.0);
}

#[test]
fn progress_bar_springs_toward_ratio_and_stops_requesting_frames() {
    init_logging();
    let (state, _) = frame(mounted(), 10_000, 0.0);
    let (mut state, effects) = frame(state, 10_016, 2000.0);

    let ratio = state.scroll_state().progress_ratio;
    assert_eq!(ratio, 0.5);
    assert!(state.scroll_tracker().smoothed_progress() < ratio);
    assert_eq!(effects, vec![Effect::RequestAnimationFrame]);

    let mut now = 10_016;
    let mut effects = effects;
    while !effects.is_empty() {
        assert!(now < 20_000, "progress bar never came to rest");
        now += 16;
        let (next, next_effects) = frame(state, now, 2000.0);
        state = next;
        effects = next_effects;
    }
    assert_eq!(state.scroll_tracker().smoothed_progress(), 0.5);
    assert_eq!(state.view().header.progress_bar, 0.5);
}

#[test]
fn frames_after_unmount_do_not_touch_scroll_state() {
    init_logging();
    let (state, _) = frame(mounted(), 16, 0.0);
    let (state, _) = update(state, Msg::PageUnmounted);
    let (state, effects) = frame(state, 32, 3000.0);

    assert!(effects.is_empty());
    assert_eq!(state.scroll_state().active_section_id, "home");
}
