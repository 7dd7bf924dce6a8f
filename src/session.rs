//! Game session: owns the state, the frame scheduler and the command queue
//!
//! The host delivers key commands between frames through a [`CommandQueue`].
//! The session is the only writer of simulation state: it drains the queue at
//! the top of every tick, and the host may also pump it right after an input
//! event so start and jump take effect without waiting for a frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState, TickInput, TickOutcome, physics, tick};
use crate::tuning::Tuning;

/// A request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a run (or restart after game over)
    Start,
    /// Jump if grounded
    Jump,
}

/// Shared FIFO of pending commands
#[derive(Debug, Clone, Default)]
pub struct CommandQueue(Rc<RefCell<VecDeque<Command>>>);

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.0.borrow_mut().push_back(command);
    }

    /// Take everything queued so far, oldest first
    pub fn take(&self) -> Vec<Command> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Opaque ID of one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host-provided per-frame callback source
///
/// `request_frame` arranges for the host to call [`GameSession::on_frame`]
/// once with the returned handle. `cancel_frame` revokes that call.
pub trait Scheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What the host page shows around the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub game_over: bool,
    /// False until the first start, for the "press Space" prompt
    pub started: bool,
}

/// Golden-ratio increment between per-run seeds
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// One mounted runner
pub struct GameSession<S: Scheduler> {
    state: GameState,
    tuning: Tuning,
    scheduler: S,
    pending_frame: Option<FrameHandle>,
    commands: CommandQueue,
    base_seed: u64,
    runs: u64,
    started: bool,
    torn_down: bool,
}

impl<S: Scheduler> GameSession<S> {
    pub fn new(tuning: Tuning, scheduler: S, seed: u64) -> Self {
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            scheduler,
            pending_frame: None,
            commands: CommandQueue::new(),
            base_seed: seed,
            runs: 0,
            started: false,
            torn_down: false,
        }
    }

    /// Handle for input handlers to push commands into
    pub fn commands(&self) -> CommandQueue {
        self.commands.clone()
    }

    pub fn submit(&self, command: Command) {
        self.commands.push(command);
    }

    /// Apply every queued command now. Called by the host between frames.
    pub fn drain_commands(&mut self) {
        for command in self.commands.take() {
            self.apply(command);
        }
    }

    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Jump => self.jump(),
        }
    }

    /// (Re)initialize the run and schedule the first tick
    pub fn start(&mut self) {
        if self.torn_down {
            log::warn!("start() after teardown ignored");
            return;
        }
        self.cancel_pending();

        let seed = self.base_seed.wrapping_add(self.runs.wrapping_mul(SEED_STEP));
        self.runs += 1;
        self.state.restart(seed, &self.tuning);
        self.started = true;
        log::info!("Run {} started (seed {})", self.runs, seed);

        self.pending_frame = self.scheduler.request_frame();
        if self.pending_frame.is_none() {
            log::warn!("Scheduler refused the first frame; run will not advance");
        }
    }

    /// Jump now if running and grounded; otherwise nothing happens
    pub fn jump(&mut self) {
        if self.state.phase == GamePhase::Running {
            physics::jump(&mut self.state.player, &self.tuning);
        }
    }

    /// End the run deliberately
    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.state.phase == GamePhase::Running {
            self.state.phase = GamePhase::GameOver;
            log::info!("Run stopped at score {}", self.state.score);
        }
    }

    /// The hosting view is going away; no more frames, no more starts
    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.torn_down = true;
        log::info!("Session torn down");
    }

    /// Frame callback. Stale handles (cancelled or replaced) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> TickOutcome {
        if self.pending_frame != Some(handle) {
            return TickOutcome::Skipped;
        }
        self.pending_frame = None;

        let mut input = TickInput::default();
        let mut drained = self.commands.take().into_iter();
        while let Some(command) = drained.next() {
            match command {
                Command::Jump => input.jump = true,
                Command::Start => {
                    // Anything queued after the start belongs to the new run
                    for later in drained {
                        self.commands.push(later);
                    }
                    // Restarting schedules its own first frame
                    self.start();
                    return TickOutcome::Skipped;
                }
            }
        }

        let outcome = tick(&mut self.state, &input, &self.tuning);
        match outcome {
            TickOutcome::Continue => {
                self.pending_frame = self.scheduler.request_frame();
            }
            TickOutcome::Collision { obstacle_id } => {
                log::info!(
                    "Game over: hit obstacle #{} at tick {}, score {}",
                    obstacle_id,
                    self.state.frame_counter,
                    self.state.score
                );
            }
            TickOutcome::Skipped => {}
        }
        outcome
    }

    /// Fire the pending frame, if any. For hosts without a real frame clock.
    pub fn advance(&mut self) -> Option<TickOutcome> {
        let handle = self.pending_frame?;
        Some(self.on_frame(handle))
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            game_over: self.state.phase == GamePhase::GameOver,
            started: self.started,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }
}
