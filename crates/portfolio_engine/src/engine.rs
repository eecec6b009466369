use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use portfolio_core::{DispatchStage, RelayPayload, SubmissionId};
use site_logging::{site_debug, site_info, site_warn};
use tokio_util::sync::CancellationToken;

use crate::relay::RelayClient;
use crate::EngineEvent;

enum EngineCommand {
    Dispatch {
        submission: SubmissionId,
        stage: DispatchStage,
        payload: RelayPayload,
    },
    ScheduleSettle {
        generation: u64,
        delay: Duration,
    },
    CancelSettle,
}

/// Runs timers and relay requests on a background tokio runtime and reports
/// their completion as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(relay: Arc<dyn RelayClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("portfolio-engine")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("portfolio-engine-commands".to_string())
            .spawn(move || {
                // At most one settle timer is pending; scheduling replaces it.
                let mut settle: Option<CancellationToken> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Dispatch {
                            submission,
                            stage,
                            payload,
                        } => {
                            let relay = relay.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = relay.dispatch(stage, &payload).await;
                                match &result {
                                    Ok(()) => site_info!(
                                        "submission {} {} delivered",
                                        submission,
                                        stage.label()
                                    ),
                                    Err(err) => site_warn!(
                                        "submission {} {} failed: {}",
                                        submission,
                                        stage.label(),
                                        err
                                    ),
                                }
                                let _ = event_tx.send(EngineEvent::DispatchFinished {
                                    submission,
                                    stage,
                                    result,
                                });
                            });
                        }
                        EngineCommand::ScheduleSettle { generation, delay } => {
                            if let Some(previous) = settle.take() {
                                previous.cancel();
                            }
                            let token = CancellationToken::new();
                            settle = Some(token.clone());
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let elapsed = token
                                    .run_until_cancelled(tokio::time::sleep(delay))
                                    .await;
                                if elapsed.is_some() {
                                    let _ = event_tx.send(EngineEvent::SettleElapsed { generation });
                                } else {
                                    site_debug!("settle {} cancelled", generation);
                                }
                            });
                        }
                        EngineCommand::CancelSettle => {
                            if let Some(previous) = settle.take() {
                                previous.cancel();
                            }
                        }
                    }
                }
                if let Some(previous) = settle.take() {
                    previous.cancel();
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn dispatch(&self, submission: SubmissionId, stage: DispatchStage, payload: RelayPayload) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch {
            submission,
            stage,
            payload,
        });
    }

    /// Delivers `SettleElapsed { generation }` after `delay`, cancelling any
    /// settle still pending.
    pub fn schedule_settle(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleSettle { generation, delay });
    }

    pub fn cancel_settle(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSettle);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
