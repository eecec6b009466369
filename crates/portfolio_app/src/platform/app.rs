use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use chrono::Datelike;
use portfolio_core::{update, AppState, Msg, NavigationRequest, SiteSettings};
use portfolio_engine::{
    EmailJsRelay, EngineHandle, LayoutViewport, RelayClient, RelayConfig, RelaySettings,
    UnconfiguredRelay,
};
use site_logging::{site_error, site_info, site_warn};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::script::{parse_command, ScriptCommand};
use super::ui;
use super::ui::constants::{FRAME_INTERVAL, LAYOUT_FILE_NAME, LOG_DESTINATION_ENV};

/// Runs the page headlessly: input lines from stdin stand in for the user,
/// view changes are printed as text.
pub fn run_app() -> anyhow::Result<()> {
    let destination = std::env::var(LOG_DESTINATION_ENV).ok();
    logging::initialize(LogDestination::from_name(destination.as_deref()));

    let layout_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LAYOUT_FILE_NAME));
    let layout = ui::layout::load_or_default(&layout_path)?;
    let settings = ui::layout::site_settings(&layout)?;
    let engine = EngineHandle::new(build_relay()).context("starting engine runtime")?;
    let mut host = PageHost::new(
        settings,
        EffectRunner::new(LayoutViewport::new(layout), engine),
    );

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let clock = Instant::now();
    let now = || u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
    site_info!("page mounted with {} sections", host.state.settings().sections.len());
    host.dispatch(Msg::PageMounted { now_ms: now() }, now());

    let mut resume_at_ms = 0;
    let mut input_closed = false;
    'frames: loop {
        let now_ms = now();
        host.pump(now_ms);

        while now_ms >= resume_at_ms {
            let line = match line_rx.try_recv() {
                Ok(line) => line,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    input_closed = true;
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Some(ScriptCommand::Quit)) => break 'frames,
                Ok(Some(ScriptCommand::Wait(ms))) => resume_at_ms = now_ms + ms,
                Ok(Some(command)) => host.apply(command, now_ms),
                Ok(None) => {}
                Err(err) => {
                    site_warn!("ignored input {:?}: {:#}", line, err);
                    eprintln!("{err:#}");
                }
            }
        }

        if input_closed && now_ms >= resume_at_ms && !host.is_busy() {
            break;
        }
        thread::sleep(FRAME_INTERVAL);
    }

    host.dispatch(Msg::PageUnmounted, now());
    println!("{}", host.render_page());
    Ok(())
}

fn build_relay() -> Arc<dyn RelayClient> {
    match RelayConfig::from_env() {
        Ok(config) => match EmailJsRelay::new(config, RelaySettings::default()) {
            Ok(relay) => {
                site_info!("relay endpoint {}", relay.config().endpoint);
                Arc::new(relay)
            }
            Err(err) => {
                site_error!("relay client unavailable: {}", err);
                Arc::new(UnconfiguredRelay)
            }
        },
        Err(err) => {
            site_warn!("contact form cannot deliver messages: {}", err);
            Arc::new(UnconfiguredRelay)
        }
    }
}

/// Owns the state and feeds it messages from input, the page and the engine.
pub(crate) struct PageHost {
    state: AppState,
    runner: EffectRunner,
    last_status: Option<String>,
}

impl PageHost {
    pub(crate) fn new(settings: SiteSettings, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_settings(settings),
            runner,
            last_status: None,
        }
    }

    /// Applies a message and everything it synchronously leads to.
    pub(crate) fn dispatch(&mut self, msg: Msg, now_ms: u64) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            site_logging::set_frame(self.state.frames_delivered());
            self.runner.sync_menu(self.state.menu().is_open, now_ms);
            queue.extend(self.runner.run(effects, now_ms));
        }

        if self.state.consume_dirty() {
            let line = ui::render::status_line(&self.state.view());
            if self.last_status.as_deref() != Some(line.as_str()) {
                println!("{line}");
                self.last_status = Some(line);
            }
        }
    }

    /// One host frame: page notifications, engine results, animation frame.
    pub(crate) fn pump(&mut self, now_ms: u64) {
        let inbox = self.runner.poll(now_ms, &self.state.settings().sections);
        for msg in inbox {
            self.dispatch(msg, now_ms);
        }
    }

    pub(crate) fn apply(&mut self, command: ScriptCommand, now_ms: u64) {
        let msg = match command {
            ScriptCommand::Scroll(y) => {
                self.runner.viewport_mut().user_scroll_to(y);
                return;
            }
            ScriptCommand::Show => {
                println!("{}", self.render_page());
                return;
            }
            ScriptCommand::Wait(_) | ScriptCommand::Quit => return,
            ScriptCommand::Navigate(id) => {
                Msg::NavigationRequested(NavigationRequest::from_header(id))
            }
            ScriptCommand::Menu => Msg::MenuToggled,
            ScriptCommand::MenuNavigate(id) => {
                Msg::NavigationRequested(NavigationRequest::from_menu(id))
            }
            ScriptCommand::ContactCta => {
                Msg::NavigationRequested(NavigationRequest::from_header("contact"))
            }
            ScriptCommand::Type(field, value) => Msg::ContactFieldEdited { field, value },
            ScriptCommand::Submit => Msg::ContactSubmitted,
            ScriptCommand::Download => Msg::DownloadCvClicked,
        };
        self.dispatch(msg, now_ms);
    }

    /// Work still in flight that an idle exit would cut short.
    pub(crate) fn is_busy(&self) -> bool {
        self.state.contact().is_submitting()
            || self.state.navigator().is_settling()
            || self.runner.frame_requested()
            || self.runner.viewport().is_scrolling()
    }

    pub(crate) fn render_page(&self) -> String {
        ui::render::render_page(&self.state.view(), chrono::Local::now().year())
    }
}
