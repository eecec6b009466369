use site_logging::{site_debug, site_info};

use crate::{AppState, Dispatch, Effect, Msg, RevealTrigger, ScrollSample};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageMounted { now_ms } => mount(&mut state, now_ms),
        Msg::PageUnmounted => unmount(&mut state),
        Msg::ScrollEvent => {
            if state.scroll_tracker().is_active() && state.frames_mut().request() {
                vec![Effect::RequestAnimationFrame]
            } else {
                Vec::new()
            }
        }
        Msg::AnimationFrame { now_ms, sample } => animation_frame(&mut state, now_ms, &sample),
        Msg::MenuToggled => {
            state.menu_mut().toggle();
            state.mark_dirty();
            Vec::new()
        }
        Msg::NavigationRequested(request) => {
            let (navigator, menu, settings) = state.navigation_parts();
            let effects = navigator.navigate(request, menu, &settings.sections);
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::SettleElapsed { generation } => state.navigator_mut().on_settle_elapsed(generation),
        Msg::SectionMeasured {
            generation,
            measurement,
        } => {
            let effects = state.navigator_mut().on_measured(generation, measurement);
            state.mark_dirty();
            effects
        }
        Msg::RevealIntersection {
            group,
            container,
            viewport_height,
            now_ms,
        } => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            state.advance_clock(now_ms);
            let now = state.now_ms();
            let revealed = match state.reveals_mut().iter_mut().find(|g| g.id() == group) {
                Some(target) => {
                    target.config().trigger == RevealTrigger::OnViewportEntry
                        && target.observe(container, viewport_height, now)
                }
                None => {
                    site_debug!("intersection for unknown reveal group {}", group);
                    false
                }
            };
            if revealed {
                state.mark_dirty();
                let mut effects = vec![Effect::UnobserveReveal { group }];
                if state.frames_mut().request() {
                    effects.push(Effect::RequestAnimationFrame);
                }
                effects
            } else {
                Vec::new()
            }
        }
        Msg::ContactFieldEdited { field, value } => {
            state.contact_mut().edit(field, value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ContactSubmitted => {
            if state.contact().is_submitting() {
                site_debug!("submit ignored while a submission is in progress");
                return (state, Vec::new());
            }
            let dispatch = state.contact_mut().submit();
            state.mark_dirty();
            dispatch.into_iter().map(dispatch_effect).collect()
        }
        Msg::RelayDispatchFinished {
            submission,
            stage,
            outcome,
        } => {
            let next = state
                .contact_mut()
                .on_dispatch_finished(submission, stage, outcome);
            state.mark_dirty();
            next.into_iter().map(dispatch_effect).collect()
        }
        Msg::DownloadCvClicked => {
            let cv = &state.settings().cv;
            site_info!("download {} as {}", cv.href, cv.file_name);
            vec![Effect::DownloadAsset {
                href: cv.href.clone(),
                file_name: cv.file_name.clone(),
            }]
        }
        Msg::SmoothScrollEnded => {
            if state.navigator_mut().on_scroll_ended() {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn mount(state: &mut AppState, now_ms: u64) -> Vec<Effect> {
    if state.is_mounted() {
        return Vec::new();
    }
    state.set_mounted(true);
    state.advance_clock(now_ms);
    let now = state.now_ms();

    let mut effects = Vec::new();
    if state.scroll_mut().activate() {
        effects.push(Effect::SubscribeScroll);
    }
    for group in state.reveals_mut() {
        match group.config().trigger {
            RevealTrigger::OnMount => {
                group.reveal(now);
            }
            RevealTrigger::OnViewportEntry if !group.is_visible() => {
                effects.push(Effect::ObserveReveal {
                    group: group.id().to_string(),
                    root_margin_px: group.config().root_margin_px,
                });
            }
            RevealTrigger::OnViewportEntry => {}
        }
    }
    // Initial sample, so the header reflects a restored scroll position.
    if state.frames_mut().request() {
        effects.push(Effect::RequestAnimationFrame);
    }
    state.mark_dirty();
    effects
}

fn unmount(state: &mut AppState) -> Vec<Effect> {
    if !state.is_mounted() {
        return Vec::new();
    }
    state.set_mounted(false);

    let mut effects = Vec::new();
    if state.scroll_mut().deactivate() {
        effects.push(Effect::UnsubscribeScroll);
    }
    effects.extend(
        state
            .reveals()
            .iter()
            .filter(|group| {
                group.config().trigger == RevealTrigger::OnViewportEntry && !group.is_visible()
            })
            .map(|group| Effect::UnobserveReveal {
                group: group.id().to_string(),
            }),
    );
    effects.extend(state.navigator_mut().cancel());
    state.frames_mut().reset();
    effects
}

fn animation_frame(state: &mut AppState, now_ms: u64, sample: &ScrollSample) -> Vec<Effect> {
    let elapsed_ms = state.frames_mut().complete(now_ms);
    let previous = state.now_ms();
    state.advance_clock(now_ms);
    let now = state.now_ms();
    if !state.is_mounted() {
        return Vec::new();
    }

    let (scroll, navigator, settings) = state.frame_parts();
    let outcome = scroll.on_frame(&settings.sections, sample, elapsed_ms);
    let arrived = navigator.on_scroll_sample(sample.scroll_y, sample.max_scroll());

    // A group animating at the previous frame needs one more render to land.
    let was_animating = state
        .reveals()
        .iter()
        .any(|group| !group.is_settled(previous));
    let animating = state.reveals().iter().any(|group| !group.is_settled(now));

    if outcome.changed || arrived || was_animating || animating {
        state.mark_dirty();
    }

    let mut effects = Vec::new();
    if (outcome.needs_frame || animating) && state.frames_mut().request() {
        effects.push(Effect::RequestAnimationFrame);
    }
    effects
}

fn dispatch_effect(dispatch: Dispatch) -> Effect {
    Effect::DispatchRelay {
        submission: dispatch.submission,
        stage: dispatch.stage,
        payload: dispatch.payload,
    }
}
