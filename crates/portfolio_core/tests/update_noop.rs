use portfolio_core::{update, AppState, Msg};

#[test]
fn scroll_end_without_navigation_changes_nothing() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::SmoothScrollEnded);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn scroll_events_before_mount_are_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ScrollEvent);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
