use portfolio_core::{DispatchOutcome, Effect, Msg, SectionRegistry};
use portfolio_engine::{EngineEvent, EngineHandle, LayoutViewport, Viewport};
use site_logging::{site_debug, site_trace, site_warn};

/// Executes core effects against the page and the engine, and turns what
/// they report back into messages.
pub(crate) struct EffectRunner {
    viewport: LayoutViewport,
    engine: EngineHandle,
    frame_requested: bool,
}

impl EffectRunner {
    pub(crate) fn new(viewport: LayoutViewport, engine: EngineHandle) -> Self {
        Self {
            viewport,
            engine,
            frame_requested: false,
        }
    }

    pub(crate) fn viewport(&self) -> &LayoutViewport {
        &self.viewport
    }

    pub(crate) fn viewport_mut(&mut self) -> &mut LayoutViewport {
        &mut self.viewport
    }

    pub(crate) fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Runs effects in order. Synchronous answers (layout reads) are returned
    /// as messages to feed back immediately.
    pub(crate) fn run(&mut self, effects: Vec<Effect>, now_ms: u64) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            site_trace!("effect {:?}", effect);
            match effect {
                Effect::SubscribeScroll => self.viewport.set_scroll_listener(true),
                Effect::UnsubscribeScroll => self.viewport.set_scroll_listener(false),
                Effect::RequestAnimationFrame => self.frame_requested = true,
                Effect::ObserveReveal {
                    group,
                    root_margin_px,
                } => self.viewport.observe(&group, root_margin_px),
                Effect::UnobserveReveal { group } => self.viewport.unobserve(&group),
                Effect::ScheduleSettle { generation, delay } => {
                    self.engine.schedule_settle(generation, delay);
                }
                Effect::CancelSettle => self.engine.cancel_settle(),
                Effect::MeasureSection {
                    section_id,
                    generation,
                } => {
                    let measurement = self.viewport.measure(&section_id);
                    if measurement.is_none() {
                        site_debug!("section {} not in page", section_id);
                    }
                    replies.push(Msg::SectionMeasured {
                        generation,
                        measurement,
                    });
                }
                Effect::SmoothScrollTo { top } => self.viewport.smooth_scroll_to(top, now_ms),
                Effect::DispatchRelay {
                    submission,
                    stage,
                    payload,
                } => self.engine.dispatch(submission, stage, payload),
                Effect::DownloadAsset { href, file_name } => {
                    self.viewport.download(&href, &file_name);
                }
            }
        }
        replies
    }

    /// Mirrors rendered state the page layout depends on.
    pub(crate) fn sync_menu(&mut self, open: bool, now_ms: u64) {
        self.viewport.set_menu_open(open, now_ms);
    }

    /// Collects page notifications, engine completions and, last, the
    /// requested animation frame.
    pub(crate) fn poll(&mut self, now_ms: u64, sections: &SectionRegistry) -> Vec<Msg> {
        let mut inbox = Vec::new();

        let events = self.viewport.advance(now_ms);
        if events.scrolled {
            inbox.push(Msg::ScrollEvent);
        }
        let viewport_height = self.viewport.viewport_height();
        inbox.extend(
            events
                .intersections
                .into_iter()
                .map(|(group, container)| Msg::RevealIntersection {
                    group,
                    container,
                    viewport_height,
                    now_ms,
                }),
        );
        if events.scroll_ended {
            inbox.push(Msg::SmoothScrollEnded);
        }

        while let Some(event) = self.engine.try_recv() {
            inbox.push(match event {
                EngineEvent::SettleElapsed { generation } => Msg::SettleElapsed { generation },
                EngineEvent::DispatchFinished {
                    submission,
                    stage,
                    result,
                } => Msg::RelayDispatchFinished {
                    submission,
                    stage,
                    outcome: match result {
                        Ok(()) => DispatchOutcome::Delivered,
                        Err(err) => {
                            site_warn!("relay {} failed: {}", stage.label(), err);
                            DispatchOutcome::Failed {
                                reason: err.to_string(),
                            }
                        }
                    },
                },
            });
        }

        if std::mem::take(&mut self.frame_requested) {
            inbox.push(Msg::AnimationFrame {
                now_ms,
                sample: self.viewport.sample(sections),
            });
        }
        inbox
    }
}
