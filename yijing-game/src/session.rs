//! Turn driver binding players, trackers, configuration and a seeded RNG.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::actions::{
    Action, ActionEnv, ActionError, ActionReport, action_points, apply_balance_adjustment,
    available_actions, resolve,
};
use crate::balance::BalanceReport;
use crate::cards::CardCatalog;
use crate::config::GameConfig;
use crate::constants::{LOG_TURN_END, LOG_TURN_START, LOG_VICTORY};
use crate::numbers::u32_to_delta;
use crate::player::Player;
use crate::resources::Resource;
use crate::victory::{VictoryCondition, VictoryProgress, VictoryRegistry, evaluate};

/// One journal line: which player triggered which event key on which turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub turn: u32,
    pub player: String,
    pub key: String,
}

/// Serializable portion of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub seed: u64,
    pub players: Vec<Player>,
    #[serde(default)]
    pub registry: VictoryRegistry,
    pub turn: u32,
    pub current: usize,
    pub remaining_action_points: u32,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub winners: BTreeMap<String, BTreeSet<VictoryCondition>>,
    #[serde(default)]
    pub over: bool,
    #[serde(default)]
    pub rng_word_pos: u128,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: SessionState,
    config: GameConfig,
    catalog: CardCatalog,
    rng: ChaCha20Rng,
}

impl GameSession {
    /// Seat players, deal starting hands and open the first turn.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoPlayers`] for an empty roster and
    /// [`ActionError::DuplicatePlayer`] when two players share a name.
    pub fn new<I, N>(
        seed: u64,
        names: I,
        config: GameConfig,
        catalog: CardCatalog,
    ) -> Result<Self, ActionError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut players: Vec<Player> = Vec::new();
        for name in names {
            let name = name.into();
            if players.iter().any(|player| player.name == name) {
                return Err(ActionError::DuplicatePlayer(name));
            }
            players.push(Player::new(name, &config.initial, &config.caps));
        }
        if players.is_empty() {
            return Err(ActionError::NoPlayers);
        }

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let deal = config.initial.hand_size.min(config.caps.hand_size);
        for player in &mut players {
            for _ in 0..deal {
                if let Some(card) = catalog.draw(&mut rng) {
                    player.hand.push(card.clone());
                }
            }
        }

        let state = SessionState {
            seed,
            players,
            registry: VictoryRegistry::new(),
            turn: 1,
            current: 0,
            remaining_action_points: 0,
            journal: Vec::new(),
            winners: BTreeMap::new(),
            over: false,
            rng_word_pos: 0,
        };
        let mut session = Self {
            state,
            config,
            catalog,
            rng,
        };
        session.begin_turn();
        Ok(session)
    }

    /// Resume a saved session. The RNG continues exactly where it stopped.
    #[must_use]
    pub fn from_state(state: SessionState, config: GameConfig, catalog: CardCatalog) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(state.seed);
        rng.set_word_pos(state.rng_word_pos);
        Self {
            state,
            config,
            catalog,
            rng,
        }
    }

    /// Snapshot suitable for storage.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        let mut state = self.state.clone();
        state.rng_word_pos = self.rng.get_word_pos();
        state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.snapshot()
    }

    /// Open the current player's turn: daily qi, balance bonus or penalty,
    /// one turn of dwell in the current zone and a fresh action point pool.
    pub fn begin_turn(&mut self) {
        if self.state.over {
            return;
        }
        let config = &self.config;
        let index = self.state.current;
        let Some(player) = self.state.players.get_mut(index) else {
            return;
        };
        let mut events = vec![LOG_TURN_START.to_string()];
        player
            .resources
            .apply_delta(Resource::Qi, u32_to_delta(config.turn.daily_qi), &config.caps);
        apply_balance_adjustment(player, config, &mut events);
        self.state
            .registry
            .tracker_mut(&player.name)
            .record_dwell(player.zone);
        self.state.remaining_action_points = action_points(player, config);
        log::info!(
            "turn {} begins for {} with {} action points",
            self.state.turn,
            player.name,
            self.state.remaining_action_points
        );
        let name = player.name.clone();
        self.record(&name, events);
        self.refresh_outcome();
    }

    /// Apply one action for the current player. [`Action::Pass`] ends the turn.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameOver`] once the game has ended,
    /// [`ActionError::NoActionPoints`] when the pool is spent, or any
    /// validation or cost error from the action itself.
    pub fn perform(&mut self, action: Action) -> Result<ActionReport, ActionError> {
        if self.state.over {
            return Err(ActionError::GameOver);
        }
        if action.is_pass() {
            self.end_turn();
            return Ok(ActionReport {
                action,
                events: Vec::new(),
            });
        }
        if self.state.remaining_action_points == 0 {
            return Err(ActionError::NoActionPoints);
        }
        let index = self.state.current;
        let Some(player) = self.state.players.get_mut(index) else {
            return Err(ActionError::NoPlayers);
        };
        let tracker = self.state.registry.tracker_mut(&player.name);
        let env = ActionEnv {
            config: &self.config,
            catalog: &self.catalog,
        };
        let report = resolve(action, player, tracker, env, &mut self.rng)?;
        self.state.remaining_action_points -= 1;
        let name = player.name.clone();
        self.record(&name, report.events.clone());
        self.refresh_outcome();
        Ok(report)
    }

    /// Close the current turn and open the next player's. The turn counter
    /// advances when play wraps back to the first seat.
    pub fn end_turn(&mut self) {
        if self.state.over {
            return;
        }
        if let Some(name) = self.current_player().map(|player| player.name.clone()) {
            self.record(&name, vec![LOG_TURN_END.to_string()]);
        }
        self.state.remaining_action_points = 0;
        self.refresh_outcome();
        if self.state.over {
            return;
        }
        self.state.current = (self.state.current + 1) % self.state.players.len();
        if self.state.current == 0 {
            self.state.turn = self.state.turn.saturating_add(1);
            if self.state.turn > self.config.turn.max_turns {
                log::info!("turn limit {} reached", self.config.turn.max_turns);
                self.state.over = true;
                return;
            }
        }
        self.begin_turn();
    }

    fn refresh_outcome(&mut self) {
        let winners = self
            .state
            .registry
            .check_all(&self.state.players, &self.config.victory);
        for (name, conditions) in &winners {
            let known = self.state.winners.get(name);
            let fresh: Vec<VictoryCondition> = conditions
                .iter()
                .filter(|condition| known.is_none_or(|set| !set.contains(*condition)))
                .copied()
                .collect();
            for condition in fresh {
                log::info!("{name} achieved {condition}");
                self.state.journal.push(JournalEntry {
                    turn: self.state.turn,
                    player: name.clone(),
                    key: format!("{LOG_VICTORY}.{}", condition.id()),
                });
            }
        }
        if !winners.is_empty() {
            self.state.over = true;
        }
        self.state.winners = winners;
    }

    fn record(&mut self, player: &str, keys: Vec<String>) {
        let turn = self.state.turn;
        self.state
            .journal
            .extend(keys.into_iter().map(|key| JournalEntry {
                turn,
                player: player.to_string(),
                key,
            }));
    }

    /// Satisfied conditions per player, evaluated fresh. Players without a
    /// tracker are evaluated against zeroed counters.
    #[must_use]
    pub fn victories(&self) -> BTreeMap<String, BTreeSet<VictoryCondition>> {
        self.state
            .players
            .iter()
            .filter_map(|player| {
                let tracker = self
                    .state
                    .registry
                    .tracker(&player.name)
                    .cloned()
                    .unwrap_or_default();
                let won = evaluate(player, &tracker, &self.config.victory);
                (!won.is_empty()).then(|| (player.name.clone(), won))
            })
            .collect()
    }

    /// Legal actions for the current player in menu order.
    #[must_use]
    pub fn menu(&self) -> Vec<Action> {
        if self.state.over {
            return Vec::new();
        }
        self.current_player()
            .map(|player| {
                available_actions(player, &self.config, self.state.remaining_action_points)
            })
            .unwrap_or_default()
    }

    /// Look up a player by name.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownPlayer`] if nobody has that name.
    pub fn player(&self, name: &str) -> Result<&Player, ActionError> {
        self.state
            .players
            .iter()
            .find(|player| player.name == name)
            .ok_or_else(|| ActionError::UnknownPlayer(name.to_string()))
    }

    /// Current balance classification for a player.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownPlayer`] if nobody has that name.
    pub fn balance(&self, name: &str) -> Result<BalanceReport, ActionError> {
        let player = self.player(name)?;
        Ok(BalanceReport::evaluate(
            player.resources.yin,
            player.resources.yang,
            &self.config.balance,
        ))
    }

    /// Progress toward every condition for a player.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownPlayer`] if nobody has that name.
    pub fn progress(&self, name: &str) -> Result<Vec<VictoryProgress>, ActionError> {
        let player = self.player(name)?;
        let tracker = self
            .state
            .registry
            .tracker(name)
            .cloned()
            .unwrap_or_default();
        Ok(VictoryProgress::report(player, &tracker, &self.config.victory))
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.players.get(self.state.current)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    #[must_use]
    pub const fn registry(&self) -> &VictoryRegistry {
        &self.state.registry
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub const fn remaining_action_points(&self) -> u32 {
        self.state.remaining_action_points
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.state.over
    }

    /// Winners recorded at the last outcome check.
    #[must_use]
    pub const fn winners(&self) -> &BTreeMap<String, BTreeSet<VictoryCondition>> {
        &self.state.winners
    }

    #[must_use]
    pub fn journal(&self) -> &[JournalEntry] {
        &self.state.journal
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.state.seed
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }
}
