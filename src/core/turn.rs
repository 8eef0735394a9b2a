//! Turn rotation across a fixed, ordered roster.
//!
//! The coordinator is driven entirely by the host loop: it never blocks,
//! never calls back, and records what happened in an event queue the host
//! drains on its own schedule. Running off the end of the roster is the
//! normal way a round finishes.

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::core::actor::Actor;
use crate::core::error::TurnError;
use crate::core::thinking::{ThinkDriver, ThinkTime};

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// No round has been started yet
    Idle,
    /// The actor at this roster index is taking its turn
    Acting(usize),
    /// Every actor has had its turn
    Over,
}

/// State transitions the host may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    RoundStarted { round: u32 },
    TurnStarted { index: usize, name: String },
    TurnEnded { index: usize, name: String },
    RoundOver { round: u32 },
}

#[derive(Debug)]
pub struct TurnCoordinator {
    roster: Vec<Actor>,
    /// Idle copies of the roster as it was handed to `start_round`
    snapshot: Vec<Actor>,
    /// Index of the next actor to start
    cursor: usize,
    state: RoundState,
    round: u32,
    think_time: ThinkTime,
    driver: ThinkDriver,
    events: VecDeque<TurnEvent>,
}

impl Default for TurnCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnCoordinator {
    pub fn new() -> Self {
        Self::with_think_time(ThinkTime::default())
    }

    pub fn with_think_time(think_time: ThinkTime) -> Self {
        Self {
            roster: Vec::new(),
            snapshot: Vec::new(),
            cursor: 0,
            state: RoundState::Idle,
            round: 0,
            think_time,
            driver: ThinkDriver::Auto,
            events: VecDeque::new(),
        }
    }

    /// Choose where computer actors think; see [`ThinkDriver`]
    pub fn with_driver(mut self, driver: ThinkDriver) -> Self {
        self.driver = driver;
        self
    }

    /// Take ownership of `actors` and hand the first one its turn.
    /// An empty roster finishes the round on the spot.
    pub fn start_round(&mut self, actors: Vec<Actor>) {
        self.snapshot = actors.iter().map(Actor::fresh).collect();
        self.begin(actors);
    }

    /// Restart from the first actor of the roster last given to
    /// `start_round`, discarding any in-flight thinking.
    pub fn reset_round(&mut self) {
        let actors = self.snapshot.iter().map(Actor::fresh).collect();
        self.begin(actors);
    }

    fn begin(&mut self, actors: Vec<Actor>) {
        self.roster = actors;
        self.cursor = 0;
        self.round += 1;
        self.state = RoundState::Idle;
        info!(round = self.round, actors = self.roster.len(), "round started");
        self.events.push_back(TurnEvent::RoundStarted { round: self.round });
        self.advance();
    }

    /// Start the next actor, or mark the round over once the roster is spent.
    /// Calling this again after the round is over only re-confirms it.
    fn advance(&mut self) {
        match self.roster.get_mut(self.cursor) {
            Some(actor) => {
                actor.start(&self.think_time, &self.driver);
                let index = self.cursor;
                self.state = RoundState::Acting(index);
                self.cursor += 1;
                info!(index, name = actor.name(), "turn started");
                self.events.push_back(TurnEvent::TurnStarted {
                    index,
                    name: actor.name().to_string(),
                });
            }
            None => {
                if self.state != RoundState::Over {
                    info!(round = self.round, "round over");
                    self.events.push_back(TurnEvent::RoundOver { round: self.round });
                }
                self.state = RoundState::Over;
            }
        }
    }

    /// End the acting actor's turn and move on. Returns `false` (and does
    /// nothing) when no actor is acting. Does not check thinking; see
    /// [`Self::try_end_current_turn`] for the gated variant.
    pub fn end_current_turn(&mut self) -> bool {
        let RoundState::Acting(index) = self.state else {
            warn!(state = ?self.state, "end turn requested with no actor acting");
            return false;
        };
        let actor = &mut self.roster[index];
        actor.end();
        info!(index, name = actor.name(), "turn ended");
        self.events.push_back(TurnEvent::TurnEnded {
            index,
            name: actor.name().to_string(),
        });
        self.advance();
        true
    }

    /// End the current turn only if the acting actor is done thinking
    pub fn try_end_current_turn(&mut self) -> Result<(), TurnError> {
        let actor = self.current().ok_or(TurnError::NoActiveTurn)?;
        if actor.is_thinking() {
            return Err(TurnError::StillThinking {
                name: actor.name().to_string(),
            });
        }
        self.end_current_turn();
        Ok(())
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_round_over(&self) -> bool {
        self.state == RoundState::Over
    }

    pub fn current(&self) -> Option<&Actor> {
        match self.state {
            RoundState::Acting(index) => self.roster.get(index),
            _ => None,
        }
    }

    pub fn current_actor_name(&self) -> Option<&str> {
        self.current().map(Actor::name)
    }

    pub fn is_current_actor_thinking(&self) -> bool {
        self.current().is_some_and(Actor::is_thinking)
    }

    pub fn turn_index(&self) -> Option<usize> {
        match self.state {
            RoundState::Acting(index) => Some(index),
            _ => None,
        }
    }

    pub fn roster(&self) -> &[Actor] {
        &self.roster
    }

    /// Number of rounds started so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn think_time(&self) -> ThinkTime {
        self.think_time
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<TurnEvent> {
        self.events.drain(..).collect()
    }
}
