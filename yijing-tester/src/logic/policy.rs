use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;
use yijing_game::{Action, Player, Polarity, bot};

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub action: Action,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(action: Action, rationale: Option<String>) -> Self {
        Self { action, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select one entry of the current player's menu.
    fn pick_action(&mut self, player: &Player, menu: &[Action]) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    Steady,
    Random,
    Cultivator,
    Oracle,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [Self::Steady, Self::Random, Self::Cultivator, Self::Oracle];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameplayStrategy::Steady => "Steady",
            GameplayStrategy::Random => "Random",
            GameplayStrategy::Cultivator => "Cultivator",
            GameplayStrategy::Oracle => "Oracle",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameplayStrategy::Steady => "built-in bot: first legal action in menu order",
            GameplayStrategy::Random => "uniform pick among legal non-pass actions",
            GameplayStrategy::Cultivator => "plays cards that restore yin/yang balance",
            GameplayStrategy::Oracle => "divines whenever qi allows",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            GameplayStrategy::Steady => Box::new(SteadyPolicy),
            GameplayStrategy::Random => Box::new(RandomPolicy::new(seed)),
            GameplayStrategy::Cultivator => Box::new(CultivatorPolicy),
            GameplayStrategy::Oracle => Box::new(OraclePolicy),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown strategy '{s}'"))
    }
}

struct SteadyPolicy;
struct CultivatorPolicy;
struct OraclePolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for SteadyPolicy {
    fn name(&self) -> &'static str {
        "Steady"
    }

    fn pick_action(&mut self, _player: &Player, menu: &[Action]) -> PolicyDecision {
        PolicyDecision::new(bot::choose(menu), None)
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn pick_action(&mut self, _player: &Player, menu: &[Action]) -> PolicyDecision {
        let options: Vec<Action> = menu.iter().copied().filter(|a| !a.is_pass()).collect();
        let action = options.choose(&mut self.rng).copied().unwrap_or(Action::Pass);
        PolicyDecision::new(action, Some(format!("{} options", options.len())))
    }
}

impl PlayerPolicy for CultivatorPolicy {
    fn name(&self) -> &'static str {
        "Cultivator"
    }

    fn pick_action(&mut self, player: &Player, menu: &[Action]) -> PolicyDecision {
        let r = &player.resources;
        let wanted = if r.yin < r.yang {
            Polarity::Yin
        } else {
            Polarity::Yang
        };
        let balancing = menu.iter().copied().find(|action| {
            matches!(action, Action::PlayCard { trigram, .. } if trigram.polarity() == wanted)
        });
        if let Some(action) = balancing {
            return PolicyDecision::new(action, Some(format!("seeking {wanted:?}")));
        }
        if menu.contains(&Action::Study) {
            return PolicyDecision::new(Action::Study, Some("no balancing card".to_string()));
        }
        if menu.contains(&Action::Meditate) {
            return PolicyDecision::new(Action::Meditate, Some("low qi".to_string()));
        }
        PolicyDecision::new(bot::choose(menu), None)
    }
}

impl PlayerPolicy for OraclePolicy {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn pick_action(&mut self, _player: &Player, menu: &[Action]) -> PolicyDecision {
        if menu.contains(&Action::Divine) {
            return PolicyDecision::new(Action::Divine, None);
        }
        if menu.contains(&Action::Meditate) {
            return PolicyDecision::new(Action::Meditate, Some("recovering qi".to_string()));
        }
        PolicyDecision::new(Action::Pass, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yijing_game::{GameConfig, Trigram, available_actions};

    fn player() -> Player {
        let config = GameConfig::default();
        Player::new("Tester", &config.initial, &config.caps)
    }

    #[test]
    fn strategies_parse_case_insensitively() {
        assert_eq!(
            "cultivator".parse::<GameplayStrategy>().unwrap(),
            GameplayStrategy::Cultivator
        );
        assert!("gambler".parse::<GameplayStrategy>().is_err());
        for strategy in GameplayStrategy::ALL {
            assert_eq!(strategy.create_policy(1).name(), strategy.label());
        }
    }

    #[test]
    fn random_policy_is_seeded() {
        let config = GameConfig::default();
        let menu = available_actions(&player(), &config, 3);
        let mut first = GameplayStrategy::Random.create_policy(9);
        let mut second = GameplayStrategy::Random.create_policy(9);
        for _ in 0..16 {
            let a = first.pick_action(&player(), &menu).action;
            let b = second.pick_action(&player(), &menu).action;
            assert_eq!(a, b);
            assert!(menu.contains(&a));
            assert!(!a.is_pass());
        }
    }

    #[test]
    fn cultivator_restores_missing_polarity() {
        let mut p = player();
        p.resources.yang = 4;
        let menu = [
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Qian,
            },
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Kun,
            },
            Action::Pass,
        ];
        let mut policy = GameplayStrategy::Cultivator.create_policy(0);
        assert_eq!(
            policy.pick_action(&p, &menu).action,
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Kun
            }
        );
    }

    #[test]
    fn oracle_passes_when_nothing_useful() {
        let mut policy = GameplayStrategy::Oracle.create_policy(0);
        assert_eq!(
            policy.pick_action(&player(), &[Action::Study, Action::Pass]).action,
            Action::Pass
        );
        assert_eq!(
            policy
                .pick_action(&player(), &[Action::Divine, Action::Pass])
                .action,
            Action::Divine
        );
    }
}
