use std::fmt;

use core_game::{Game, GameConfig, GameSnapshot, TickOutcome};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

use crate::events::GameEvent;

const COMMAND_QUEUE_DEPTH: usize = 16;
const EVENT_QUEUE_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "game session task is no longer running"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug)]
enum Command {
    Start(oneshot::Sender<GameSnapshot>),
    Sell(oneshot::Sender<GameSnapshot>),
    Stop(oneshot::Sender<GameSnapshot>),
    Snapshot(oneshot::Sender<GameSnapshot>),
}

/// Clone-able handle to a session actor. Commands are serialized through one
/// task that exclusively owns the game and its tick clock, so ticks and user
/// actions can never interleave mid-mutation.
#[derive(Debug, Clone)]
pub struct GameSessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<GameEvent>,
}

impl GameSessionHandle {
    pub async fn start(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Start).await
    }

    pub async fn sell(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Sell).await
    }

    /// Cancels the tick clock without settling the run. Idempotent; used on
    /// view teardown and in tests.
    pub async fn stop(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Stop).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Snapshot).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<GameSnapshot>) -> Command,
    ) -> Result<GameSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}

pub fn spawn_session(config: GameConfig) -> GameSessionHandle {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (events_tx, _) = broadcast::channel(EVENT_QUEUE_DEPTH);

    let actor = SessionActor {
        game: Game::new(config),
        clock: Clock::Stopped,
        commands: commands_rx,
        events: events_tx.clone(),
    };
    tokio::spawn(actor.run());

    GameSessionHandle {
        commands: commands_tx,
        events: events_tx,
    }
}

// Explicit started/stopped state instead of a nullable timer handle.
enum Clock {
    Stopped,
    Ticking(Interval),
}

enum Step {
    Command(Option<Command>),
    Tick,
}

struct SessionActor {
    game: Game,
    clock: Clock,
    commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<GameEvent>,
}

impl SessionActor {
    async fn run(mut self) {
        loop {
            let step = match &mut self.clock {
                Clock::Ticking(interval) => {
                    tokio::select! {
                        command = self.commands.recv() => Step::Command(command),
                        _ = interval.tick() => Step::Tick,
                    }
                }
                Clock::Stopped => Step::Command(self.commands.recv().await),
            };

            match step {
                // All handles dropped: tear down, cancelling any live clock.
                Step::Command(None) => break,
                Step::Command(Some(command)) => self.handle_command(command),
                Step::Tick => self.handle_tick(),
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start(reply) => {
                if self.game.start() {
                    // Replacing the interval drops any previous clock in the
                    // same actor step; two tick streams can never coexist.
                    self.clock = Clock::Ticking(self.new_interval());
                    self.publish(GameEvent::RunStarted);
                }
                let _ = reply.send(self.game.snapshot());
            }
            Command::Sell(reply) => {
                if let Some(price) = self.game.sell() {
                    self.publish(GameEvent::SellRecorded { price });
                }
                let _ = reply.send(self.game.snapshot());
            }
            Command::Stop(reply) => {
                self.clock = Clock::Stopped;
                let _ = reply.send(self.game.snapshot());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.game.snapshot());
            }
        }
    }

    fn handle_tick(&mut self) {
        match self.game.apply_tick() {
            TickOutcome::Ignored => self.clock = Clock::Stopped,
            TickOutcome::Advanced(advance) => {
                self.publish(GameEvent::BarAppended {
                    step: advance.step,
                    candle: advance.candle,
                    countdown_ms: advance.countdown_ms,
                });
            }
            TickOutcome::Finished {
                advance,
                settle_price,
            } => {
                self.clock = Clock::Stopped;
                self.publish(GameEvent::BarAppended {
                    step: advance.step,
                    candle: advance.candle,
                    countdown_ms: advance.countdown_ms,
                });
                if let Some(score) = self.game.score() {
                    self.publish(GameEvent::RunFinished {
                        settle_price,
                        peak_price: self.game.peak_price(),
                        score,
                    });
                }
            }
        }
    }

    fn new_interval(&self) -> Interval {
        let period = Duration::from_millis(self.game.config().step_ms);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    fn publish(&self, event: GameEvent) {
        // Nobody listening is fine; the game advances regardless.
        let _ = self.events.send(event);
    }
}
