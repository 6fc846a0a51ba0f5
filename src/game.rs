//! Game Controller: round state machine.
//!
//! The controller never performs I/O itself. Starting a round hands back a
//! [`RoundStart`] carrying a generation-tagged [`FetchTicket`]; the host runs
//! the fetch and reports back through [`Game::on_fetch_complete`]. A result
//! whose ticket is not the current generation, or that arrives after the round
//! already has its creature, is dropped: a creature never changes mid-round.

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::creature::Creature;
use crate::error::FetchError;
use crate::score::{ScoreStore, ScoreTally};

/// Identifies the round transition a fetch was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Command for the host: fetch a creature for `ticket`, optionally focus the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundStart {
    pub ticket: FetchTicket,
    pub focus_input: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Transient per-round state. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub target: Option<Creature>,
    pub revealed: bool,
    /// `None` until a guess has been scored this round.
    pub last_guess_correct: Option<bool>,
    pub input_has_error: bool,
    pub input_text: String,
    pub fetch: FetchStatus,
}

impl RoundState {
    fn fresh(previous: Option<Creature>) -> Self {
        Self {
            target: previous,
            revealed: false,
            last_guess_correct: None,
            input_has_error: false,
            input_text: String::new(),
            fetch: FetchStatus::Loading,
        }
    }
}

/// What a submit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Empty input; only the error flag changed.
    Rejected,
    /// Nothing to guess against (already revealed, or no creature loaded yet).
    Ignored,
    /// Guess evaluated and the creature revealed.
    Scored { correct: bool },
}

pub struct Game {
    config: GameConfig,
    store: ScoreStore,
    tally: ScoreTally,
    round: RoundState,
    generation: u64,
}

impl Game {
    /// Build the controller and read the persisted tally (when scoring is on).
    /// Call [`Game::start`] to kick off the first round.
    pub fn new(config: GameConfig, store: ScoreStore) -> Self {
        let tally = if config.track_score {
            store.load(&config.storage_key, ScoreTally::default())
        } else {
            ScoreTally::default()
        };
        debug!("loaded tally {:?} (tracking: {})", tally, config.track_score);
        Self {
            config,
            store,
            tally,
            round: RoundState::fresh(None),
            generation: 0,
        }
    }

    /// Continue ticket numbering after `generation`, so results still in
    /// flight for a previous `Game` on the same page can never match this one.
    pub fn continuing_after(mut self, generation: u64) -> Self {
        self.generation = self.generation.max(generation);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Current tally, or `None` when scoring is disabled.
    pub fn tally(&self) -> Option<ScoreTally> {
        self.config.track_score.then_some(self.tally)
    }

    pub fn current_ticket(&self) -> FetchTicket {
        FetchTicket(self.generation)
    }

    /// First round after mount.
    pub fn start(&mut self) -> RoundStart {
        self.begin_round()
    }

    /// New round: reset flags, keep showing the old creature masked until the
    /// new one lands, and request exactly one fetch.
    pub fn play_again(&mut self) -> RoundStart {
        self.begin_round()
    }

    /// Re-issue the fetch after a failure. `None` unless the last fetch failed.
    pub fn retry(&mut self) -> Option<RoundStart> {
        if !matches!(self.round.fetch, FetchStatus::Failed(_)) {
            return None;
        }
        self.generation += 1;
        self.round.fetch = FetchStatus::Loading;
        info!("retrying creature fetch (round {})", self.generation);
        Some(RoundStart {
            ticket: FetchTicket(self.generation),
            focus_input: self.config.focus_input,
        })
    }

    fn begin_round(&mut self) -> RoundStart {
        self.generation += 1;
        let previous = self.round.target.take();
        self.round = RoundState::fresh(previous);
        info!("starting round {}", self.generation);
        RoundStart {
            ticket: FetchTicket(self.generation),
            focus_input: self.config.focus_input,
        }
    }

    /// Apply a finished fetch. Returns `false` when the result was stale or a duplicate and was dropped.
    pub fn on_fetch_complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Creature, FetchError>,
    ) -> bool {
        if ticket.0 != self.generation {
            warn!(
                "dropping stale fetch result for round {} (current {})",
                ticket.0, self.generation
            );
            return false;
        }
        if self.round.fetch != FetchStatus::Loading {
            warn!("dropping duplicate fetch result for round {}", ticket.0);
            return false;
        }
        match result {
            Ok(creature) => {
                debug!("round {} creature #{} ready", ticket.0, creature.id);
                self.round.target = Some(creature);
                self.round.fetch = FetchStatus::Ready;
            }
            Err(e) => {
                warn!("creature fetch failed: {}", e);
                self.round.fetch = FetchStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Text field edits. Always clears the validation error; text is inert once revealed.
    pub fn on_input_change(&mut self, text: &str) {
        self.round.input_has_error = false;
        if !self.round.revealed {
            self.round.input_text = text.to_string();
        }
    }

    /// Evaluate the current input against the target creature.
    pub fn submit(&mut self) -> GuessOutcome {
        if self.round.revealed {
            return GuessOutcome::Ignored;
        }
        if self.round.input_text.is_empty() {
            self.round.input_has_error = true;
            return GuessOutcome::Rejected;
        }
        let correct = match (&self.round.fetch, &self.round.target) {
            (FetchStatus::Ready, Some(target)) => target.is_named(&self.round.input_text),
            _ => return GuessOutcome::Ignored,
        };

        self.round.revealed = true;
        self.round.last_guess_correct = Some(correct);
        self.round.input_text.clear();
        debug!("guess evaluated: correct={}", correct);

        if self.config.track_score {
            self.tally.record(correct);
            if let Err(e) = self.store.save(&self.config.storage_key, &self.tally) {
                warn!("tally kept in memory only: {}", e);
            }
        }
        GuessOutcome::Scored { correct }
    }
}
