//! Async driver: one task owns the engine, a channel carries commands,
//! and an interval maps real time onto simulated days while running.

use crate::clock::Clock;
use statecraft_engine::{DecisionError, Engine, GameState};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 64;

/// Failures of the async control surface.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Decision(#[from] DecisionError),
    /// The simulation task is gone (shut down or panicked).
    #[error("simulation task closed")]
    Closed,
}

enum Command {
    MakeDecision {
        decision: String,
        options: Vec<String>,
        reply: oneshot::Sender<Result<(), DecisionError>>,
    },
    SetRunning(bool),
    JumpToNextYear,
    JumpToLegislatureEnd,
    Snapshot(oneshot::Sender<GameState>),
    Elapsed(oneshot::Sender<Duration>),
    Shutdown,
}

/// Cloneable handle to a spawned simulation task.
#[derive(Clone)]
pub struct SimHandle {
    tx: mpsc::Sender<Command>,
}

impl SimHandle {
    async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.tx.send(command).await.map_err(|_| RuntimeError::Closed)
    }

    pub async fn make_decision(
        &self,
        decision: &str,
        options: &[&str],
    ) -> Result<(), RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::MakeDecision {
            decision: decision.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::Closed)??;
        Ok(())
    }

    /// Starts or pauses the daily tick (and the play clock with it).
    pub async fn set_running(&self, running: bool) -> Result<(), RuntimeError> {
        self.send(Command::SetRunning(running)).await
    }

    pub async fn jump_to_next_year(&self) -> Result<(), RuntimeError> {
        self.send(Command::JumpToNextYear).await
    }

    pub async fn jump_to_legislature_end(&self) -> Result<(), RuntimeError> {
        self.send(Command::JumpToLegislatureEnd).await
    }

    pub async fn snapshot(&self) -> Result<GameState, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Accumulated play time.
    pub async fn elapsed(&self) -> Result<Duration, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Elapsed(reply)).await?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Stops the task; the engine comes back through the join handle.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.send(Command::Shutdown).await
    }
}

/// Spawns the simulation task. Each elapsed `tick_period` advances one
/// simulated day while the simulation is set running. Returns the
/// control handle and a join handle yielding the engine on shutdown.
pub fn spawn(
    engine: Engine,
    tick_period: Duration,
    clock: Clock,
) -> (SimHandle, JoinHandle<Engine>) {
    let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(async move {
        let mut engine = engine;
        let mut clock = clock;
        let mut running = false;
        let mut interval = tokio::time::interval(tick_period);
        // Missed ticks queue up rather than drop: simulated days are
        // never lost, only delivered late.
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        info!(period_ms = tick_period.as_millis() as u64, "simulation task started");
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if running && !engine.game_over() {
                        let outcome = engine.advance_one_day();
                        if let Some(year) = outcome.completed_year {
                            debug!(year, "year completed");
                        }
                        if engine.game_over() {
                            running = false;
                            clock.pause();
                            info!(date = %engine.date(), "era finished, pausing");
                        }
                    }
                }
                command = rx.recv() => match command {
                    Some(Command::MakeDecision { decision, options, reply }) => {
                        let selected: Vec<&str> = options.iter().map(String::as_str).collect();
                        let result = engine.make_decision(&decision, &selected);
                        let _ = reply.send(result);
                    }
                    Some(Command::SetRunning(run)) => {
                        running = run && !engine.game_over();
                        if running {
                            clock.resume();
                        } else {
                            clock.pause();
                        }
                    }
                    Some(Command::JumpToNextYear) => {
                        engine.jump_to_next_year();
                        if engine.game_over() {
                            running = false;
                            clock.pause();
                        }
                    }
                    Some(Command::JumpToLegislatureEnd) => {
                        engine.jump_to_legislature_end();
                        if engine.game_over() {
                            running = false;
                            clock.pause();
                        }
                    }
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(engine.snapshot());
                    }
                    Some(Command::Elapsed(reply)) => {
                        let _ = reply.send(clock.elapsed());
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }
        clock.pause();
        engine
    });
    (SimHandle { tx }, task)
}
