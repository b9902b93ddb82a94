use std::collections::BTreeMap;

use serde::Serialize;
use yijing_game::{Action, ActionError, GameSession, Resources};

use crate::logic::policy::{GameplayStrategy, PlayerPolicy, PolicyDecision};

/// Configuration for a simulation session.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub max_steps: usize,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            max_steps: 5_000,
        }
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Snapshot of one resolved action.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub turn: u32,
    pub player: String,
    pub action: String,
    pub rationale: Option<String>,
    pub events: Vec<String>,
}

/// How a simulated game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Victory,
    TurnLimit,
    StepLimit,
}

/// Final ledger of one seat.
#[derive(Debug, Clone, Serialize)]
pub struct SeatSummary {
    pub name: String,
    pub zone: String,
    pub resources: Resources,
    pub hand: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: String,
    pub ending: Ending,
    pub turns: u32,
    pub steps: usize,
    pub rejected_actions: Vec<String>,
    pub violations: Vec<String>,
    pub winners: BTreeMap<String, Vec<String>>,
    pub seats: Vec<SeatSummary>,
    pub journal_entries: usize,
    #[serde(skip)]
    pub decisions: Vec<DecisionRecord>,
}

/// Drives a [`GameSession`] with one policy shared by every seat.
pub struct SimulationSession {
    session: GameSession,
    config: SimulationConfig,
    steps: usize,
    rejected: Vec<String>,
    decisions: Vec<DecisionRecord>,
}

impl SimulationSession {
    #[must_use]
    pub fn new(session: GameSession, config: SimulationConfig) -> Self {
        Self {
            session,
            config,
            steps: 0,
            rejected: Vec::new(),
            decisions: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_over() || self.steps >= self.config.max_steps
    }

    /// Let `policy` act once for the current player.
    pub fn advance(&mut self, policy: &mut dyn PlayerPolicy) -> Option<&DecisionRecord> {
        if self.is_finished() {
            return None;
        }
        let player = self.session.current_player()?.clone();
        let menu = self.session.menu();
        let PolicyDecision { action, rationale } = policy.pick_action(&player, &menu);
        let turn = self.session.turn();
        self.steps += 1;
        let events = match self.session.perform(action) {
            Ok(report) => report.events,
            Err(err) => {
                self.reject(&player.name, &action.to_string(), &err);
                // A rejected action forfeits the rest of the turn.
                if let Err(err) = self.session.perform(Action::Pass) {
                    self.reject(&player.name, &Action::Pass.to_string(), &err);
                }
                return None;
            }
        };
        log::debug!("turn {turn}: {} -> {action} ({})", player.name, policy.name());
        self.decisions.push(DecisionRecord {
            turn,
            player: player.name,
            action: action.to_string(),
            rationale,
            events,
        });
        self.decisions.last()
    }

    fn reject(&mut self, player: &str, action: &str, err: &ActionError) {
        log::warn!("{player} attempted {action}: {err}");
        self.rejected.push(format!("{player}: {action} ({err})"));
    }

    #[must_use]
    pub fn into_summary(self) -> SimulationSummary {
        let session = self.session;
        let ending = if !session.winners().is_empty() {
            Ending::Victory
        } else if session.is_over() {
            Ending::TurnLimit
        } else {
            Ending::StepLimit
        };
        SimulationSummary {
            seed: session.seed(),
            strategy: self.config.strategy.label().to_string(),
            ending,
            turns: session.turn(),
            steps: self.steps,
            rejected_actions: self.rejected,
            violations: audit(&session),
            winners: session
                .winners()
                .iter()
                .map(|(name, conditions)| {
                    (
                        name.clone(),
                        conditions.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
            seats: session
                .players()
                .iter()
                .map(|player| SeatSummary {
                    name: player.name.clone(),
                    zone: player.zone.to_string(),
                    resources: player.resources.clone(),
                    hand: player.hand.len(),
                })
                .collect(),
            journal_entries: session.journal().len(),
            decisions: self.decisions,
        }
    }
}

/// Rule invariants that must hold for any finished or paused session.
#[must_use]
pub fn audit(session: &GameSession) -> Vec<String> {
    let mut violations = Vec::new();
    let caps = &session.config().caps;
    for player in session.players() {
        let r = &player.resources;
        let counters = [
            ("qi", r.qi, caps.qi),
            ("merit", r.merit, caps.merit),
            ("sincerity", r.sincerity, caps.sincerity),
            ("yin", r.yin, caps.yin),
            ("yang", r.yang, caps.yang),
        ];
        for (label, value, cap) in counters {
            if value > cap {
                violations.push(format!("{}: {label} {value} exceeds cap {cap}", player.name));
            }
        }
        for (element, value) in r.affinities.iter() {
            if value > caps.affinity {
                violations.push(format!(
                    "{}: {element} affinity {value} exceeds cap {}",
                    player.name, caps.affinity
                ));
            }
        }
        if player.hand.len() > caps.hand_size {
            violations.push(format!("{}: hand of {} cards", player.name, player.hand.len()));
        }
    }
    if session.victories() != *session.winners() {
        violations.push("recorded winners differ from a fresh evaluation".to_string());
    }
    if session.turn() > session.config().turn.max_turns.saturating_add(1) {
        violations.push(format!("turn {} past the limit", session.turn()));
    }
    violations
}

/// Play `session` to completion under `config`.
#[must_use]
pub fn run_game(session: GameSession, config: SimulationConfig) -> SimulationSummary {
    let mut policy = config.strategy.create_policy(config.seed);
    let mut sim = SimulationSession::new(session, config);
    while !sim.is_finished() {
        sim.advance(policy.as_mut());
    }
    sim.into_summary()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yijing_game::{CardCatalog, GameConfig};

    fn session(seed: u64) -> GameSession {
        GameSession::new(
            seed,
            ["Fuxi", "Wen"],
            GameConfig::default(),
            CardCatalog::bundled(),
        )
        .unwrap()
    }

    #[test]
    fn every_strategy_finishes_cleanly() {
        for strategy in GameplayStrategy::ALL {
            let summary = run_game(session(7), SimulationConfig::new(strategy, 7));
            assert_ne!(summary.ending, Ending::StepLimit, "{strategy} stalled");
            assert!(
                summary.rejected_actions.is_empty(),
                "{strategy}: {:?}",
                summary.rejected_actions
            );
            assert!(
                summary.violations.is_empty(),
                "{strategy}: {:?}",
                summary.violations
            );
            assert_eq!(summary.seats.len(), 2);
        }
    }

    struct ForcedPolicy(Action);

    impl PlayerPolicy for ForcedPolicy {
        fn name(&self) -> &'static str {
            "Forced"
        }

        fn pick_action(
            &mut self,
            _player: &yijing_game::Player,
            _menu: &[Action],
        ) -> PolicyDecision {
            PolicyDecision::new(self.0, None)
        }
    }

    #[test]
    fn rejected_action_is_recorded_and_forfeits_turn() {
        let mut sim = SimulationSession::new(
            session(4),
            SimulationConfig::new(GameplayStrategy::Steady, 4),
        );
        let mut policy = ForcedPolicy(Action::Move {
            zone: yijing_game::Zone::Earth,
        });
        assert!(sim.advance(&mut policy).is_none());
        assert_eq!(sim.session.current_player().unwrap().name, "Wen");
        let summary = sim.into_summary();
        assert_eq!(summary.rejected_actions.len(), 1);
        assert!(summary.rejected_actions[0].starts_with("Fuxi: move to earth"));
        assert!(summary.decisions.is_empty());
    }

    #[test]
    fn step_limit_halts_play() {
        let config = SimulationConfig::new(GameplayStrategy::Steady, 3).with_max_steps(4);
        let summary = run_game(session(3), config);
        assert_eq!(summary.steps, 4);
        assert_eq!(summary.ending, Ending::StepLimit);
        assert_eq!(summary.decisions.len(), 4);
    }

    #[test]
    fn identical_seeds_make_identical_summaries() {
        let config = SimulationConfig::new(GameplayStrategy::Random, 11);
        let a = run_game(session(11), config);
        let b = run_game(session(11), config);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
