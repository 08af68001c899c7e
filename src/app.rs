//! Application orchestration layer
//!
//! Wires the clock, hold scheduler, and intent sink into the gesture arbiter,
//! then runs the single-threaded event loop: raw input and timer firings go
//! into the arbiter, its intent events go out to the presentation controller
//! and the screen router, and every iteration ends with a draw that publishes
//! fresh hit regions back to the input service.

pub mod runtime;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;
use crate::error::Result;
use crate::gesture::{
    Clock, GestureArbiter, IntentEvent, SessionId, SystemClock, TokioHoldScheduler,
};
use crate::input::{ControlInput, HostAction, InputAction, InputService};
use crate::nav::ScreenRouter;
use crate::render::{ColorTheme, PresentationController, TerminalUi};

/// Animation/render tick while something is moving on screen.
const TICK_INTERVAL: Duration = Duration::from_millis(33);
/// Terminal poll interval for the blocking input thread.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Application orchestrator - owns the arbiter and its downstream consumers.
pub struct Application {
    clock: Arc<dyn Clock>,
    arbiter: GestureArbiter,
    input_service: InputService,
    presenter: PresentationController,
    router: ScreenRouter,
    renderer: TerminalUi,
    intent_rx: UnboundedReceiver<IntentEvent>,
    hold_rx: UnboundedReceiver<SessionId>,
    quit: bool,
}

impl Application {
    /// Wire components together from configuration.
    pub fn new(config: &AppConfig, theme: ColorTheme) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let (hold_tx, hold_rx) = mpsc::unbounded_channel();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();

        let arbiter = GestureArbiter::new(
            config.arbiter_config(),
            Arc::clone(&clock),
            Box::new(TokioHoldScheduler::new(hold_tx)),
            Box::new(intent_tx),
        );

        Self {
            clock,
            arbiter,
            input_service: InputService::new(),
            presenter: PresentationController::new(config.animation_timings()),
            router: ScreenRouter::new(),
            renderer: TerminalUi::new(theme),
            intent_rx,
            hold_rx,
            quit: false,
        }
    }

    /// Run the application until quit, restoring the terminal on the way out.
    pub async fn run(&mut self) -> Result<()> {
        self.renderer.initialize()?;
        let outcome = self.event_loop().await;
        let cleanup = self.renderer.cleanup();
        outcome.and(cleanup)
    }

    async fn event_loop(&mut self) -> Result<()> {
        let Application {
            clock,
            arbiter,
            input_service,
            presenter,
            router,
            renderer,
            intent_rx,
            hold_rx,
            quit,
        } = self;

        let shutdown = Arc::new(AtomicBool::new(false));
        let (raw_tx, mut raw_rx) = mpsc::unbounded_channel();
        let input_thread =
            runtime::spawn_input_thread(raw_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let layout = renderer.draw(presenter, router)?;
        input_service.set_layout(layout);

        while !*quit {
            tokio::select! {
                maybe_raw = raw_rx.recv() => {
                    match maybe_raw {
                        Some(raw) => {
                            if let Some(action) = input_service.process_event(raw) {
                                apply_action(arbiter, router, quit, action);
                            }
                        }
                        // Input thread is gone; nothing more can arrive.
                        None => break,
                    }
                }
                maybe_session = hold_rx.recv() => {
                    if let Some(session) = maybe_session {
                        arbiter.on_timer_fire(session);
                    }
                }
                _ = ticker.tick() => {}
            }

            dispatch_intents(intent_rx, presenter, router, clock.as_ref());
            presenter.tick(clock.now());

            let layout = renderer.draw(presenter, router)?;
            input_service.set_layout(layout);
        }

        shutdown.store(true, Ordering::SeqCst);
        let _ = input_thread.join();
        Ok(())
    }
}

/// Route one input action to the arbiter or the host.
///
/// Arbiter contract violations are logged and otherwise ignored: the service
/// should never produce them, and the arbiter guarantees its state is
/// untouched when they happen.
fn apply_action(
    arbiter: &mut GestureArbiter,
    router: &mut ScreenRouter,
    quit: &mut bool,
    action: InputAction,
) {
    let outcome = match action {
        InputAction::Control(input) => match input {
            ControlInput::PressStart => arbiter.on_press_start(),
            ControlInput::Move { dx } => arbiter.on_move(dx),
            ControlInput::Release => arbiter.on_release(),
            ControlInput::Terminate => arbiter.on_terminate(),
            ControlInput::SelectOption(side) => arbiter.on_option_selected(side),
        },
        InputAction::Host(host) => {
            match host {
                HostAction::Quit => *quit = true,
                HostAction::SelectTab(tab) => router.select_tab(tab),
                HostAction::Back => router.back(),
                // ratatui picks up the new size on the next draw.
                HostAction::Resize { .. } => {}
            }
            Ok(())
        }
    };

    if let Err(err) = outcome {
        warn!("{err}");
    }
}

/// Drain the arbiter's emissions, in order, to the downstream consumers.
fn dispatch_intents(
    intent_rx: &mut UnboundedReceiver<IntentEvent>,
    presenter: &mut PresentationController,
    router: &mut ScreenRouter,
    clock: &dyn Clock,
) {
    while let Ok(event) = intent_rx.try_recv() {
        presenter.handle_event(event, clock.now());
        if let IntentEvent::Navigate { target } = event {
            router.navigate(target);
        }
    }
}
