use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use yijing_game::{CardCatalog, GameConfig, GameSession};

use crate::logic::policy::GameplayStrategy;
use crate::logic::simulation::{Ending, SimulationConfig, SimulationSummary, run_game};

#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub strategy_name: String,
    pub passed: bool,
    pub games_run: usize,
    pub clean_games: usize,
    pub victories: usize,
    pub turn_limit_endings: usize,
    pub average_turns: f64,
    /// Victory condition id mapped to how many games it was achieved in.
    pub conditions: BTreeMap<String, usize>,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    pub games: Vec<SimulationSummary>,
}

/// Runs seeded self-play games for each strategy and audits them.
pub struct LogicTester {
    config: GameConfig,
    catalog: CardCatalog,
    players: Vec<String>,
    verbose: bool,
}

impl LogicTester {
    pub fn new(
        config: GameConfig,
        catalog: CardCatalog,
        players: Vec<String>,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            catalog,
            players,
            verbose,
        }
    }

    pub fn run_strategy(
        &self,
        strategy: GameplayStrategy,
        seeds: &[u64],
        iterations: usize,
    ) -> StrategyResult {
        if self.verbose {
            println!("🧪 Testing strategy: {}", strategy.label().bright_white());
        }

        let mut games = Vec::new();
        let mut failures = Vec::new();
        let mut durations = Vec::new();

        for &seed in seeds {
            for i in 0..iterations {
                let game_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
                let start_time = Instant::now();
                match self.play(strategy, game_seed) {
                    Ok(summary) => {
                        durations.push(start_time.elapsed());
                        if let Some(err) = evaluate_expectations(&summary) {
                            if self.verbose {
                                println!("  ❌ seed {game_seed}: {}", err.clone().red());
                            }
                            failures.push(format!("seed {game_seed}: {err}"));
                        } else if self.verbose {
                            println!(
                                "  ✅ seed {game_seed} ({:?}) turns:{} ending:{:?}",
                                start_time.elapsed(),
                                summary.turns,
                                summary.ending
                            );
                        }
                        games.push(summary);
                    }
                    Err(err) => failures.push(format!("seed {game_seed}: {err:#}")),
                }
            }
        }

        summarize(strategy, seeds.len() * iterations, games, failures, &durations)
    }

    fn play(&self, strategy: GameplayStrategy, seed: u64) -> anyhow::Result<SimulationSummary> {
        let session = GameSession::new(
            seed,
            self.players.iter().cloned(),
            self.config.clone(),
            self.catalog.clone(),
        )?;
        Ok(run_game(session, SimulationConfig::new(strategy, seed)))
    }
}

fn evaluate_expectations(summary: &SimulationSummary) -> Option<String> {
    if summary.ending == Ending::StepLimit {
        return Some(format!("game stalled after {} steps", summary.steps));
    }
    if let Some(rejected) = summary.rejected_actions.first() {
        return Some(format!("menu offered an illegal action: {rejected}"));
    }
    summary.violations.first().cloned()
}

fn summarize(
    strategy: GameplayStrategy,
    games_run: usize,
    games: Vec<SimulationSummary>,
    failures: Vec<String>,
    durations: &[Duration],
) -> StrategyResult {
    let clean_games = games
        .iter()
        .filter(|game| evaluate_expectations(game).is_none())
        .count();
    let victories = games.iter().filter(|g| g.ending == Ending::Victory).count();
    let turn_limit_endings = games.iter().filter(|g| g.ending == Ending::TurnLimit).count();
    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let average_turns = if games.is_empty() {
        0.0
    } else {
        f64::from(total_turns) / f64::from(u32::try_from(games.len()).unwrap_or(u32::MAX))
    };
    let mut conditions = BTreeMap::new();
    for game in &games {
        let mut achieved: Vec<&String> = game.winners.values().flatten().collect();
        achieved.sort_unstable();
        achieved.dedup();
        for id in achieved {
            *conditions.entry(id.clone()).or_insert(0) += 1;
        }
    }
    let average_duration = if durations.is_empty() {
        Duration::ZERO
    } else {
        durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(1)
    };

    StrategyResult {
        strategy_name: strategy.label().to_string(),
        passed: failures.is_empty(),
        games_run,
        clean_games,
        victories,
        turn_limit_endings,
        average_turns,
        conditions,
        failures,
        average_duration,
        games,
    }
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tester() -> LogicTester {
        LogicTester::new(
            GameConfig::default(),
            CardCatalog::bundled(),
            vec!["Fuxi".to_string(), "Wen".to_string()],
            false,
        )
    }

    #[test]
    fn steady_strategy_passes_audit() {
        let result = tester().run_strategy(GameplayStrategy::Steady, &[1, 2], 2);
        assert!(result.passed, "{:?}", result.failures);
        assert_eq!(result.games_run, 4);
        assert_eq!(result.clean_games, 4);
        assert_eq!(result.victories + result.turn_limit_endings, 4);
    }

    #[test]
    fn duplicate_roster_is_reported_not_panicked() {
        let tester = LogicTester::new(
            GameConfig::default(),
            CardCatalog::bundled(),
            vec!["Wen".to_string(), "Wen".to_string()],
            false,
        );
        let result = tester.run_strategy(GameplayStrategy::Random, &[5], 1);
        assert!(!result.passed);
        assert!(result.games.is_empty());
        assert_eq!(result.games_run, 1);
        assert_eq!(result.failures.len(), 1);
    }
}
