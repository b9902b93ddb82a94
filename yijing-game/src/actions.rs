//! Turn actions: costs, the ordered action menu and resolution.
//!
//! Costs are a hard gate. An action whose cost exceeds the player's current
//! balance fails with [`ActionError::Insufficient`] before anything is
//! mutated. Gains are then applied through the clamped ledger.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::balance::BalanceBand;
use crate::cards::{CardCatalog, Trigram};
use crate::config::{ConfigProvider, GameConfig};
use crate::constants::{
    DEFAULT_BASE_ACTION_POINTS, DEFAULT_COST_CONSULT_MERIT, DEFAULT_COST_DIVINE_QI,
    DEFAULT_COST_MOVE_QI, DEFAULT_COST_PLAY_CARD_QI, DEFAULT_COST_STUDY_QI,
    DEFAULT_COST_TRANSFORM_SINCERITY, DEFAULT_DAILY_QI, DEFAULT_MAX_ACTION_POINTS,
    DEFAULT_MAX_TURNS, DEFAULT_SINCERITY_AP_THRESHOLD, DEFAULT_SYNERGY_ELEMENTS,
    DIVINE_BASE_CHANCE, DIVINE_MAX_CHANCE, DIVINE_MERIT_STEP, LOG_BALANCE_BONUS,
    LOG_BALANCE_PENALTY, LOG_CARD_PLAYED, LOG_CONSULTED, LOG_DIVINE_FAILURE, LOG_DIVINE_SUCCESS,
    LOG_MEDITATED, LOG_MOVED, LOG_STUDIED, LOG_STUDY_MERIT, LOG_TASK_COMPLETED, LOG_TRANSFORMED,
    MEDITATE_BASE_QI, PATH_BASE_ACTION_POINTS, PATH_COST_CONSULT_MERIT, PATH_COST_DIVINE_QI,
    PATH_COST_MOVE_QI, PATH_COST_PLAY_CARD_QI, PATH_COST_STUDY_QI, PATH_COST_TRANSFORM_SINCERITY,
    PATH_DAILY_QI, PATH_MAX_ACTION_POINTS, PATH_MAX_TURNS, PATH_SINCERITY_AP_THRESHOLD,
    PATH_SYNERGY_ELEMENTS, STUDY_BASE_DRAW, STUDY_MERIT_HAND_LARGE, STUDY_MERIT_HAND_SMALL,
    STUDY_SPECIALIST_AFFINITY, TRANSFORM_AFFINITY_GAIN, TRANSFORM_POLARITY_GAIN,
};
use crate::effects::{EffectLimits, adjust_affinity, apply_effects};
use crate::numbers::{u32_to_delta, u32_to_f64};
use crate::player::{Player, Zone};
use crate::resources::{Resource, Resources};
use crate::victory::VictoryTracker;

/// Resource price of each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCosts {
    pub play_card_qi: u32,
    pub move_qi: u32,
    pub study_qi: u32,
    pub divine_qi: u32,
    pub transform_sincerity: u32,
    pub consult_merit: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            play_card_qi: DEFAULT_COST_PLAY_CARD_QI,
            move_qi: DEFAULT_COST_MOVE_QI,
            study_qi: DEFAULT_COST_STUDY_QI,
            divine_qi: DEFAULT_COST_DIVINE_QI,
            transform_sincerity: DEFAULT_COST_TRANSFORM_SINCERITY,
            consult_merit: DEFAULT_COST_CONSULT_MERIT,
        }
    }
}

impl ActionCosts {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            play_card_qi: provider.get(PATH_COST_PLAY_CARD_QI, DEFAULT_COST_PLAY_CARD_QI),
            move_qi: provider.get(PATH_COST_MOVE_QI, DEFAULT_COST_MOVE_QI),
            study_qi: provider.get(PATH_COST_STUDY_QI, DEFAULT_COST_STUDY_QI),
            divine_qi: provider.get(PATH_COST_DIVINE_QI, DEFAULT_COST_DIVINE_QI),
            transform_sincerity: provider.get(
                PATH_COST_TRANSFORM_SINCERITY,
                DEFAULT_COST_TRANSFORM_SINCERITY,
            ),
            consult_merit: provider.get(PATH_COST_CONSULT_MERIT, DEFAULT_COST_CONSULT_MERIT),
        }
    }
}

/// Per-turn pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRules {
    pub base_action_points: u32,
    pub max_action_points: u32,
    pub daily_qi: u32,
    pub sincerity_ap_threshold: u32,
    pub synergy_elements: usize,
    pub max_turns: u32,
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            base_action_points: DEFAULT_BASE_ACTION_POINTS,
            max_action_points: DEFAULT_MAX_ACTION_POINTS,
            daily_qi: DEFAULT_DAILY_QI,
            sincerity_ap_threshold: DEFAULT_SINCERITY_AP_THRESHOLD,
            synergy_elements: DEFAULT_SYNERGY_ELEMENTS,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl TurnRules {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            base_action_points: provider.get(PATH_BASE_ACTION_POINTS, DEFAULT_BASE_ACTION_POINTS),
            max_action_points: provider.get(PATH_MAX_ACTION_POINTS, DEFAULT_MAX_ACTION_POINTS),
            daily_qi: provider.get(PATH_DAILY_QI, DEFAULT_DAILY_QI),
            sincerity_ap_threshold: provider.get(
                PATH_SINCERITY_AP_THRESHOLD,
                DEFAULT_SINCERITY_AP_THRESHOLD,
            ),
            synergy_elements: provider.get(PATH_SYNERGY_ELEMENTS, DEFAULT_SYNERGY_ELEMENTS),
            max_turns: provider.get(PATH_MAX_TURNS, DEFAULT_MAX_TURNS),
        }
    }
}

/// Action points available at the start of a turn.
#[must_use]
pub fn action_points(player: &Player, config: &GameConfig) -> u32 {
    let rules = &config.turn;
    let resources = &player.resources;
    let mut points = rules
        .base_action_points
        .saturating_add(player.zone.action_point_bonus());
    if config.balance.classify(resources.yin, resources.yang) == BalanceBand::Balanced {
        points = points.saturating_add(1);
    }
    if resources.affinities.count_at_least(1) >= rules.synergy_elements {
        points = points.saturating_add(1);
    }
    if resources.sincerity >= rules.sincerity_ap_threshold {
        points = points.saturating_add(1);
    }
    points.min(rules.max_action_points)
}

/// Failures raised by the turn driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("not enough {resource}: need {needed}, have {available}")]
    Insufficient {
        resource: Resource,
        needed: u32,
        available: u32,
    },
    #[error("no action points left this turn")]
    NoActionPoints,
    #[error("no card at hand index {0}")]
    InvalidCard(usize),
    #[error("card {card} does not carry trigram {trigram}")]
    TrigramNotOnCard { card: String, trigram: Trigram },
    #[error("already in zone {0}")]
    AlreadyInZone(Zone),
    #[error("cannot transform {0} into itself")]
    SameTrigram(Trigram),
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("player name {0} is already taken")]
    DuplicatePlayer(String),
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("the game is already over")]
    GameOver,
}

/// Everything a player may do on their turn, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    PlayCard { card: usize, trigram: Trigram },
    Move { zone: Zone },
    Study,
    Meditate,
    Transform { from: Trigram, to: Trigram },
    Divine,
    Consult,
    Pass,
}

impl Action {
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::PlayCard { .. } => "play_card",
            Self::Move { .. } => "move",
            Self::Study => "study",
            Self::Meditate => "meditate",
            Self::Transform { .. } => "transform",
            Self::Divine => "divine",
            Self::Consult => "consult",
            Self::Pass => "pass",
        }
    }

    /// Resource and amount this action consumes, if any.
    #[must_use]
    pub const fn cost(self, costs: &ActionCosts) -> Option<(Resource, u32)> {
        match self {
            Self::PlayCard { .. } => Some((Resource::Qi, costs.play_card_qi)),
            Self::Move { .. } => Some((Resource::Qi, costs.move_qi)),
            Self::Study => Some((Resource::Qi, costs.study_qi)),
            Self::Divine => Some((Resource::Qi, costs.divine_qi)),
            Self::Transform { .. } => Some((Resource::Sincerity, costs.transform_sincerity)),
            Self::Consult => Some((Resource::Merit, costs.consult_merit)),
            Self::Meditate | Self::Pass => None,
        }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayCard { card, trigram } => write!(f, "play_card #{card} as {trigram}"),
            Self::Move { zone } => write!(f, "move to {zone}"),
            Self::Transform { from, to } => write!(f, "transform {from} -> {to}"),
            other => f.write_str(other.kind()),
        }
    }
}

/// Actions legal for `player` with `remaining` action points, in menu order.
/// [`Action::Pass`] is always last.
#[must_use]
pub fn available_actions(player: &Player, config: &GameConfig, remaining: u32) -> Vec<Action> {
    let mut menu = Vec::new();
    if remaining > 0 {
        for (card, held) in player.hand.iter().enumerate() {
            let (upper, lower) = held.trigrams();
            menu.push(Action::PlayCard { card, trigram: upper });
            if lower != upper {
                menu.push(Action::PlayCard { card, trigram: lower });
            }
        }
        menu.extend(
            Zone::ALL
                .into_iter()
                .filter(|zone| *zone != player.zone)
                .map(|zone| Action::Move { zone }),
        );
        menu.push(Action::Study);
        menu.push(Action::Meditate);
        let mut sources: Vec<Trigram> = player
            .hand
            .iter()
            .flat_map(|card| [card.trigrams().0, card.trigrams().1])
            .collect();
        sources.sort_unstable();
        sources.dedup();
        for from in sources {
            menu.extend(
                Trigram::ALL
                    .into_iter()
                    .filter(|to| *to != from)
                    .map(|to| Action::Transform { from, to }),
            );
        }
        menu.push(Action::Divine);
        menu.push(Action::Consult);
        menu.retain(|action| affordable(&player.resources, *action, &config.costs));
    }
    menu.push(Action::Pass);
    menu
}

fn affordable(resources: &Resources, action: Action, costs: &ActionCosts) -> bool {
    action
        .cost(costs)
        .is_none_or(|(resource, amount)| resources.can_afford(resource, amount))
}

/// Shared, read-only inputs to action resolution.
#[derive(Debug, Clone, Copy)]
pub struct ActionEnv<'a> {
    pub config: &'a GameConfig,
    pub catalog: &'a CardCatalog,
}

impl ActionEnv<'_> {
    fn limits(&self) -> EffectLimits<'_> {
        EffectLimits {
            caps: &self.config.caps,
            element_threshold: self.config.victory.element,
        }
    }
}

/// Result of a resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: Action,
    /// Journal keys emitted while resolving.
    pub events: Vec<String>,
}

/// Validate and apply one action. Nothing is mutated when an error is returned.
///
/// # Errors
///
/// Returns an [`ActionError`] when the action is malformed for the player's
/// current state or its cost cannot be paid.
pub fn resolve<R: Rng + ?Sized>(
    action: Action,
    player: &mut Player,
    tracker: &mut VictoryTracker,
    env: ActionEnv<'_>,
    rng: &mut R,
) -> Result<ActionReport, ActionError> {
    validate(action, player)?;
    if let Some((resource, amount)) = action.cost(&env.config.costs) {
        let available = player.resources.get(resource);
        if available < amount {
            return Err(ActionError::Insufficient {
                resource,
                needed: amount,
                available,
            });
        }
        player
            .resources
            .apply_delta(resource, -u32_to_delta(amount), &env.config.caps);
    }

    let mut events = Vec::new();
    match action {
        Action::PlayCard { card, trigram } => {
            play_card(player, tracker, card, trigram, env, &mut events);
        }
        Action::Move { zone } => {
            player.zone = zone;
            events.push(LOG_MOVED.to_string());
        }
        Action::Study => study(player, env, rng, &mut events),
        Action::Meditate => meditate(player, env, &mut events),
        Action::Transform { from, to } => transform(player, tracker, from, to, env, &mut events),
        Action::Divine => divine(player, tracker, env, rng, &mut events),
        Action::Consult => {
            tracker.add_wisdom(format!("consult.{}", player.zone));
            events.push(LOG_CONSULTED.to_string());
        }
        Action::Pass => {}
    }
    log::debug!("{} resolved {action}", player.name);
    Ok(ActionReport { action, events })
}

fn validate(action: Action, player: &Player) -> Result<(), ActionError> {
    match action {
        Action::PlayCard { card, trigram } => {
            let held = player.hand.get(card).ok_or(ActionError::InvalidCard(card))?;
            if !held.has_trigram(trigram) {
                return Err(ActionError::TrigramNotOnCard {
                    card: held.name().to_string(),
                    trigram,
                });
            }
        }
        Action::Move { zone } if zone == player.zone => {
            return Err(ActionError::AlreadyInZone(zone));
        }
        Action::Transform { from, to } if from == to => {
            return Err(ActionError::SameTrigram(from));
        }
        _ => {}
    }
    Ok(())
}

/// Apply the qi bonus or penalty for the player's current balance band.
pub fn apply_balance_adjustment(
    player: &mut Player,
    config: &GameConfig,
    events: &mut Vec<String>,
) {
    let resources = &player.resources;
    let band = config.balance.classify(resources.yin, resources.yang);
    let delta = config.balance.qi_adjustment(band);
    if delta == 0 {
        return;
    }
    player.resources.apply_delta(Resource::Qi, delta, &config.caps);
    let key = if delta > 0 {
        LOG_BALANCE_BONUS
    } else {
        LOG_BALANCE_PENALTY
    };
    events.push(key.to_string());
}

fn play_card(
    player: &mut Player,
    tracker: &mut VictoryTracker,
    index: usize,
    trigram: Trigram,
    env: ActionEnv<'_>,
    events: &mut Vec<String>,
) {
    let Some(card) = player.remove_card(index) else {
        return;
    };
    let caps = &env.config.caps;
    player
        .resources
        .apply_delta(trigram.polarity().resource(), 1, caps);
    adjust_affinity(&mut player.resources, trigram.element(), 1, env.limits(), events);
    tracker.add_mastery(trigram.as_str());
    events.push(LOG_CARD_PLAYED.to_string());

    if let Some(task) = card.task_for(player.zone) {
        player
            .resources
            .apply_delta(Resource::Merit, u32_to_delta(task.merit_reward), caps);
        player
            .resources
            .apply_delta(Resource::Sincerity, u32_to_delta(task.sincerity_reward), caps);
        events.push(LOG_TASK_COMPLETED.to_string());
    }

    apply_effects(card.effects(), &mut player.resources, tracker, env.limits(), events);
    apply_balance_adjustment(player, env.config, events);
}

fn study<R: Rng + ?Sized>(
    player: &mut Player,
    env: ActionEnv<'_>,
    rng: &mut R,
    events: &mut Vec<String>,
) {
    let limit = env.config.caps.hand_size;
    let (_, dominant) = player.resources.affinities.dominant();
    let wanted = if dominant >= STUDY_SPECIALIST_AFFINITY {
        STUDY_BASE_DRAW + 1
    } else {
        STUDY_BASE_DRAW
    };
    for _ in 0..wanted {
        let Some(card) = env.catalog.draw(rng) else {
            break;
        };
        if !player.add_card(card.clone(), limit) {
            break;
        }
    }
    events.push(LOG_STUDIED.to_string());

    let merit = if player.hand.len() >= STUDY_MERIT_HAND_LARGE {
        2
    } else if player.hand.len() >= STUDY_MERIT_HAND_SMALL {
        1
    } else {
        0
    };
    if merit > 0 {
        player
            .resources
            .apply_delta(Resource::Merit, merit, &env.config.caps);
        events.push(LOG_STUDY_MERIT.to_string());
    }
}

fn meditate(player: &mut Player, env: ActionEnv<'_>, events: &mut Vec<String>) {
    let caps = &env.config.caps;
    let resources = &mut player.resources;
    resources.apply_delta(Resource::Qi, MEDITATE_BASE_QI, caps);
    match player.zone {
        Zone::Heaven => {
            resources.apply_delta(Resource::Qi, 2, caps);
            resources.apply_delta(Resource::Yang, 2, caps);
        }
        Zone::Human => {
            resources.apply_delta(Resource::Qi, 1, caps);
            let lesser = if resources.yin <= resources.yang {
                Resource::Yin
            } else {
                Resource::Yang
            };
            resources.apply_delta(lesser, 1, caps);
        }
        Zone::Earth => {
            resources.apply_delta(Resource::Yin, 2, caps);
        }
    }
    events.push(LOG_MEDITATED.to_string());
}

fn transform(
    player: &mut Player,
    tracker: &mut VictoryTracker,
    from: Trigram,
    to: Trigram,
    env: ActionEnv<'_>,
    events: &mut Vec<String>,
) {
    tracker.add_transformation();
    player
        .resources
        .apply_delta(to.polarity().resource(), TRANSFORM_POLARITY_GAIN, &env.config.caps);
    adjust_affinity(
        &mut player.resources,
        to.element(),
        TRANSFORM_AFFINITY_GAIN,
        env.limits(),
        events,
    );
    tracker.add_mastery(format!("{from}->{to}"));
    events.push(LOG_TRANSFORMED.to_string());
}

/// Chance that a divination succeeds at the given merit.
#[must_use]
pub fn divination_chance(merit: u32) -> f64 {
    (DIVINE_MERIT_STEP.mul_add(u32_to_f64(merit), DIVINE_BASE_CHANCE)).min(DIVINE_MAX_CHANCE)
}

fn divine<R: Rng + ?Sized>(
    player: &mut Player,
    tracker: &mut VictoryTracker,
    env: ActionEnv<'_>,
    rng: &mut R,
    events: &mut Vec<String>,
) {
    let caps = &env.config.caps;
    let success = rng.random::<f64>() < divination_chance(player.resources.merit);
    tracker.record_divination(success);
    if success {
        let omen = Trigram::ALL[rng.random_range(0..Trigram::ALL.len())];
        player.resources.apply_delta(Resource::Merit, 1, caps);
        player.resources.apply_delta(Resource::Qi, 1, caps);
        tracker.add_wisdom(format!("divine.{omen}"));
        events.push(LOG_DIVINE_SUCCESS.to_string());
    } else {
        player.resources.apply_delta(Resource::Qi, -1, caps);
        events.push(LOG_DIVINE_FAILURE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Task};
    use crate::resources::Element;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn setup() -> (Player, VictoryTracker, GameConfig, CardCatalog) {
        let config = GameConfig::default();
        let player = Player::new("Shao Yong", &config.initial, &config.caps);
        (player, VictoryTracker::default(), config, CardCatalog::bundled())
    }

    fn thunder() -> Card {
        let tasks = Zone::ALL
            .into_iter()
            .cycle()
            .take(6)
            .map(|zone| Task::new(zone, "line", "practice", 2, 1))
            .collect();
        Card::new("Thunder", (Trigram::Zhen, Trigram::Kun), tasks).unwrap()
    }

    #[test]
    fn menu_is_ordered_and_ends_with_pass() {
        let (mut player, _, config, _) = setup();
        player.hand.push(thunder());
        let menu = available_actions(&player, &config, 3);
        assert_eq!(
            menu[0],
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Zhen
            }
        );
        assert_eq!(menu.last(), Some(&Action::Pass));
        assert!(menu.contains(&Action::Move { zone: Zone::Heaven }));
        assert!(!menu.contains(&Action::Move { zone: Zone::Earth }));
        assert!(!menu.iter().any(|action| matches!(action, Action::Transform { .. })));

        assert_eq!(available_actions(&player, &config, 0), vec![Action::Pass]);
    }

    #[test]
    fn unaffordable_action_fails_without_mutation() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        player.resources.sincerity = 2;
        let before = player.clone();
        let err = resolve(
            Action::Transform {
                from: Trigram::Qian,
                to: Trigram::Kun,
            },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ActionError::Insufficient {
                resource: Resource::Sincerity,
                needed: 3,
                available: 2
            }
        );
        assert_eq!(player, before);
        assert_eq!(tracker.transformations(), 0);
    }

    #[test]
    fn play_card_credits_task_and_masters_trigram() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        player.hand.push(thunder());
        let report = resolve(
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Zhen,
            },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap();
        assert!(player.hand.is_empty());
        assert_eq!(player.resources.yang, 1);
        assert_eq!(player.resources.affinities.get(Element::Wood), 1);
        assert_eq!(player.resources.merit, 3);
        assert_eq!(player.resources.sincerity, 3);
        assert!(tracker.mastered().contains("zhen"));
        assert!(report.events.contains(&LOG_TASK_COMPLETED.to_string()));
        // yin 0 / yang 1 is severely skewed
        assert_eq!(player.resources.qi, 6);
        assert!(report.events.contains(&LOG_BALANCE_PENALTY.to_string()));
    }

    #[test]
    fn play_card_rejects_wrong_trigram_and_index() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        player.hand.push(thunder());
        let err = resolve(
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Li,
            },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::TrigramNotOnCard { .. }));
        let err = resolve(
            Action::PlayCard {
                card: 4,
                trigram: Trigram::Zhen,
            },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, ActionError::InvalidCard(4));
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn meditate_depends_on_zone() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        resolve(Action::Meditate, &mut player, &mut tracker, env, &mut rng).unwrap();
        assert_eq!(player.resources.qi, 11);
        assert_eq!(player.resources.yin, 2);

        player.zone = Zone::Heaven;
        resolve(Action::Meditate, &mut player, &mut tracker, env, &mut rng).unwrap();
        assert_eq!(player.resources.qi, 16);
        assert_eq!(player.resources.yang, 2);

        player.zone = Zone::Human;
        player.resources.yang = 3;
        resolve(Action::Meditate, &mut player, &mut tracker, env, &mut rng).unwrap();
        assert_eq!(player.resources.qi, 20);
        assert_eq!(player.resources.yin, 3);
    }

    #[test]
    fn move_costs_qi_and_rejects_same_zone() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let err = resolve(
            Action::Move { zone: Zone::Earth },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, ActionError::AlreadyInZone(Zone::Earth));
        assert_eq!(player.resources.qi, 8);

        resolve(
            Action::Move { zone: Zone::Human },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap();
        assert_eq!(player.zone, Zone::Human);
        assert_eq!(player.resources.qi, 7);
    }

    #[test]
    fn transform_records_and_grants() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        player.resources.sincerity = 5;
        resolve(
            Action::Transform {
                from: Trigram::Qian,
                to: Trigram::Li,
            },
            &mut player,
            &mut tracker,
            env,
            &mut rng,
        )
        .unwrap();
        assert_eq!(player.resources.sincerity, 2);
        assert_eq!(player.resources.yin, 2);
        assert_eq!(player.resources.affinities.fire, 2);
        assert_eq!(tracker.transformations(), 1);
        assert!(tracker.mastered().contains("qian->li"));
    }

    #[test]
    fn study_draws_and_rewards_large_hands() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..3 {
            player.hand.push(thunder());
        }
        resolve(Action::Study, &mut player, &mut tracker, env, &mut rng).unwrap();
        assert_eq!(player.hand.len(), 5);
        assert_eq!(player.resources.merit, 2);
        assert_eq!(player.resources.qi, 7);

        resolve(Action::Study, &mut player, &mut tracker, env, &mut rng).unwrap();
        assert_eq!(player.hand.len(), config.caps.hand_size);
        assert_eq!(player.resources.merit, 4);
    }

    #[test]
    fn divination_updates_tracker_either_way() {
        let (mut player, mut tracker, config, catalog) = setup();
        let env = ActionEnv {
            config: &config,
            catalog: &catalog,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        player.resources.qi = 25;
        for _ in 0..6 {
            resolve(Action::Divine, &mut player, &mut tracker, env, &mut rng).unwrap();
        }
        assert_eq!(tracker.divinations(), 6);
        assert!((0.0..=1.0).contains(&tracker.accuracy()));
        assert!((divination_chance(0) - 0.4).abs() < 1e-12);
        assert!((divination_chance(20) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn action_points_stack_and_cap() {
        let (mut player, _, config, _) = setup();
        assert_eq!(action_points(&player, &config), 4);
        player.zone = Zone::Heaven;
        player.resources.sincerity = 5;
        player.resources.affinities.metal = 1;
        player.resources.affinities.wood = 1;
        player.resources.affinities.fire = 1;
        assert_eq!(action_points(&player, &config), config.turn.max_action_points);
    }
}
