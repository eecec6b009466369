#![allow(dead_code)]

use std::sync::Once;

use portfolio_core::{update, AppState, Effect, Msg, Rect, ScrollSample, PORTFOLIO_SECTIONS};

pub const SECTION_HEIGHT: f64 = 800.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(site_logging::initialize_for_tests);
}

/// Six stacked sections of equal height, sampled at `scroll_y`.
pub fn sample_at(scroll_y: f64) -> ScrollSample {
    let sections = PORTFOLIO_SECTIONS
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let top = index as f64 * SECTION_HEIGHT - scroll_y;
            (id.to_string(), Some(Rect::new(top, top + SECTION_HEIGHT)))
        })
        .collect();
    ScrollSample {
        scroll_y,
        viewport_height: VIEWPORT_HEIGHT,
        document_height: SECTION_HEIGHT * PORTFOLIO_SECTIONS.len() as f64,
        sections,
    }
}

pub fn mounted() -> AppState {
    let (state, _) = update(AppState::new(), Msg::PageMounted { now_ms: 0 });
    state
}

pub fn frame(state: AppState, now_ms: u64, scroll_y: f64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::AnimationFrame {
            now_ms,
            sample: sample_at(scroll_y),
        },
    )
}
