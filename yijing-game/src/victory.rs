//! Victory tracking and evaluation.
//!
//! Every condition is an independent predicate over a player's counters, the
//! player's [`VictoryTracker`] and the configured [`VictoryThresholds`].
//! Evaluation is pure, so asking twice without a state change returns the
//! same set.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::balance::balance_ratio;
use crate::cards::Trigram;
use crate::config::ConfigProvider;
use crate::constants::{
    DEFAULT_VICTORY_CHANGE_BALANCE, DEFAULT_VICTORY_CHANGE_TRANSFORMATIONS,
    DEFAULT_VICTORY_ELEMENT, DEFAULT_VICTORY_FLUX_AFFINITY_TOTAL,
    DEFAULT_VICTORY_FLUX_TRANSFORMATIONS, DEFAULT_VICTORY_HARMONY_BALANCE,
    DEFAULT_VICTORY_HARMONY_ELEMENTS, DEFAULT_VICTORY_MERIT, DEFAULT_VICTORY_ORACLE_ACCURACY,
    DEFAULT_VICTORY_ORACLE_DIVINATIONS, DEFAULT_VICTORY_PERFECTION_MERIT,
    DEFAULT_VICTORY_PERFECTION_QI, DEFAULT_VICTORY_PERFECTION_SINCERITY,
    DEFAULT_VICTORY_PROPHET_ACCURACY, DEFAULT_VICTORY_PROPHET_DIVINATIONS,
    DEFAULT_VICTORY_SCHOLAR_GUA, DEFAULT_VICTORY_SCHOLAR_MERIT, DEFAULT_VICTORY_STEWARD_MERIT,
    DEFAULT_VICTORY_STEWARD_QI, DEFAULT_VICTORY_STEWARD_SINCERITY, DEFAULT_VICTORY_TAIJI_BALANCE,
    DEFAULT_VICTORY_TAIJI_MERIT, DEFAULT_VICTORY_WISDOM, DEFAULT_VICTORY_WUWEI_BALANCE,
    DEFAULT_VICTORY_WUWEI_SINCERITY, DEFAULT_VICTORY_ZONE_DWELL, PATH_VICTORY_CHANGE_BALANCE,
    PATH_VICTORY_CHANGE_TRANSFORMATIONS, PATH_VICTORY_ELEMENT, PATH_VICTORY_FLUX_AFFINITY_TOTAL,
    PATH_VICTORY_FLUX_TRANSFORMATIONS, PATH_VICTORY_HARMONY_BALANCE,
    PATH_VICTORY_HARMONY_ELEMENTS, PATH_VICTORY_MERIT, PATH_VICTORY_ORACLE_ACCURACY,
    PATH_VICTORY_ORACLE_DIVINATIONS, PATH_VICTORY_PERFECTION_MERIT, PATH_VICTORY_PERFECTION_QI,
    PATH_VICTORY_PERFECTION_SINCERITY, PATH_VICTORY_PROPHET_ACCURACY,
    PATH_VICTORY_PROPHET_DIVINATIONS, PATH_VICTORY_SCHOLAR_GUA, PATH_VICTORY_SCHOLAR_MERIT,
    PATH_VICTORY_STEWARD_MERIT, PATH_VICTORY_STEWARD_QI, PATH_VICTORY_STEWARD_SINCERITY,
    PATH_VICTORY_TAIJI_BALANCE, PATH_VICTORY_TAIJI_MERIT, PATH_VICTORY_WISDOM,
    PATH_VICTORY_WUWEI_BALANCE, PATH_VICTORY_WUWEI_SINCERITY, PATH_VICTORY_ZONE_DWELL,
};
use crate::numbers::{u32_to_f64, usize_to_f64};
use crate::player::{Player, Zone};

/// Auxiliary per-player counters that live outside the resource ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryTracker {
    #[serde(default)]
    divinations: u32,
    #[serde(default)]
    successes: u32,
    #[serde(default)]
    wisdom: BTreeSet<String>,
    #[serde(default)]
    transformations: u32,
    #[serde(default)]
    dwell: BTreeMap<Zone, u32>,
    #[serde(default)]
    mastered: BTreeSet<String>,
}

impl Default for VictoryTracker {
    fn default() -> Self {
        Self {
            divinations: 0,
            successes: 0,
            wisdom: BTreeSet::new(),
            transformations: 0,
            dwell: Zone::ALL.into_iter().map(|zone| (zone, 0)).collect(),
            mastered: BTreeSet::new(),
        }
    }
}

impl VictoryTracker {
    /// Record one divination attempt.
    pub fn record_divination(&mut self, success: bool) {
        self.divinations = self.divinations.saturating_add(1);
        if success {
            self.successes = self.successes.saturating_add(1);
        }
    }

    #[must_use]
    pub const fn divinations(&self) -> u32 {
        self.divinations
    }

    /// Running mean over every attempt ever made; 0.0 before the first.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.divinations == 0 {
            return 0.0;
        }
        u32_to_f64(self.successes) / u32_to_f64(self.divinations)
    }

    pub fn add_wisdom(&mut self, id: impl Into<String>) {
        self.wisdom.insert(id.into());
    }

    #[must_use]
    pub const fn wisdom(&self) -> &BTreeSet<String> {
        &self.wisdom
    }

    pub fn add_transformation(&mut self) {
        self.transformations = self.transformations.saturating_add(1);
    }

    #[must_use]
    pub const fn transformations(&self) -> u32 {
        self.transformations
    }

    /// Count one turn spent in `zone`.
    pub fn record_dwell(&mut self, zone: Zone) {
        let turns = self.dwell.entry(zone).or_insert(0);
        *turns = turns.saturating_add(1);
    }

    #[must_use]
    pub fn dwell(&self, zone: Zone) -> u32 {
        self.dwell.get(&zone).copied().unwrap_or(0)
    }

    /// Fewest turns spent in any single zone.
    #[must_use]
    pub fn min_dwell(&self) -> u32 {
        Zone::ALL
            .into_iter()
            .map(|zone| self.dwell(zone))
            .min()
            .unwrap_or(0)
    }

    pub fn add_mastery(&mut self, gua: impl Into<String>) {
        self.mastered.insert(gua.into());
    }

    #[must_use]
    pub const fn mastered(&self) -> &BTreeSet<String> {
        &self.mastered
    }

    /// Number of the eight basic trigrams mastered so far.
    #[must_use]
    pub fn basic_gua_mastered(&self) -> usize {
        Trigram::ALL
            .iter()
            .filter(|trigram| self.mastered.contains(trigram.as_str()))
            .count()
    }
}

/// Configured thresholds, one group per condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictoryThresholds {
    pub merit: u32,
    pub taiji_balance: f64,
    pub taiji_merit: u32,
    pub element: u32,
    pub oracle_divinations: u32,
    pub oracle_accuracy: f64,
    pub wisdom: usize,
    pub change_transformations: u32,
    pub change_balance: f64,
    pub zone_dwell: u32,
    pub harmony_balance: f64,
    pub harmony_elements: usize,
    pub steward_qi: u32,
    pub steward_sincerity: u32,
    pub steward_merit: u32,
    pub wuwei_sincerity: u32,
    pub wuwei_balance: f64,
    pub scholar_gua: usize,
    pub scholar_merit: u32,
    pub perfection_qi: u32,
    pub perfection_merit: u32,
    pub perfection_sincerity: u32,
    pub prophet_divinations: u32,
    pub prophet_accuracy: f64,
    pub flux_transformations: u32,
    pub flux_affinity_total: u32,
}

impl Default for VictoryThresholds {
    fn default() -> Self {
        Self {
            merit: DEFAULT_VICTORY_MERIT,
            taiji_balance: DEFAULT_VICTORY_TAIJI_BALANCE,
            taiji_merit: DEFAULT_VICTORY_TAIJI_MERIT,
            element: DEFAULT_VICTORY_ELEMENT,
            oracle_divinations: DEFAULT_VICTORY_ORACLE_DIVINATIONS,
            oracle_accuracy: DEFAULT_VICTORY_ORACLE_ACCURACY,
            wisdom: DEFAULT_VICTORY_WISDOM,
            change_transformations: DEFAULT_VICTORY_CHANGE_TRANSFORMATIONS,
            change_balance: DEFAULT_VICTORY_CHANGE_BALANCE,
            zone_dwell: DEFAULT_VICTORY_ZONE_DWELL,
            harmony_balance: DEFAULT_VICTORY_HARMONY_BALANCE,
            harmony_elements: DEFAULT_VICTORY_HARMONY_ELEMENTS,
            steward_qi: DEFAULT_VICTORY_STEWARD_QI,
            steward_sincerity: DEFAULT_VICTORY_STEWARD_SINCERITY,
            steward_merit: DEFAULT_VICTORY_STEWARD_MERIT,
            wuwei_sincerity: DEFAULT_VICTORY_WUWEI_SINCERITY,
            wuwei_balance: DEFAULT_VICTORY_WUWEI_BALANCE,
            scholar_gua: DEFAULT_VICTORY_SCHOLAR_GUA,
            scholar_merit: DEFAULT_VICTORY_SCHOLAR_MERIT,
            perfection_qi: DEFAULT_VICTORY_PERFECTION_QI,
            perfection_merit: DEFAULT_VICTORY_PERFECTION_MERIT,
            perfection_sincerity: DEFAULT_VICTORY_PERFECTION_SINCERITY,
            prophet_divinations: DEFAULT_VICTORY_PROPHET_DIVINATIONS,
            prophet_accuracy: DEFAULT_VICTORY_PROPHET_ACCURACY,
            flux_transformations: DEFAULT_VICTORY_FLUX_TRANSFORMATIONS,
            flux_affinity_total: DEFAULT_VICTORY_FLUX_AFFINITY_TOTAL,
        }
    }
}

impl VictoryThresholds {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            merit: provider.get(PATH_VICTORY_MERIT, DEFAULT_VICTORY_MERIT),
            taiji_balance: provider.get(PATH_VICTORY_TAIJI_BALANCE, DEFAULT_VICTORY_TAIJI_BALANCE),
            taiji_merit: provider.get(PATH_VICTORY_TAIJI_MERIT, DEFAULT_VICTORY_TAIJI_MERIT),
            element: provider.get(PATH_VICTORY_ELEMENT, DEFAULT_VICTORY_ELEMENT),
            oracle_divinations: provider.get(
                PATH_VICTORY_ORACLE_DIVINATIONS,
                DEFAULT_VICTORY_ORACLE_DIVINATIONS,
            ),
            oracle_accuracy: provider.get(
                PATH_VICTORY_ORACLE_ACCURACY,
                DEFAULT_VICTORY_ORACLE_ACCURACY,
            ),
            wisdom: provider.get(PATH_VICTORY_WISDOM, DEFAULT_VICTORY_WISDOM),
            change_transformations: provider.get(
                PATH_VICTORY_CHANGE_TRANSFORMATIONS,
                DEFAULT_VICTORY_CHANGE_TRANSFORMATIONS,
            ),
            change_balance: provider.get(
                PATH_VICTORY_CHANGE_BALANCE,
                DEFAULT_VICTORY_CHANGE_BALANCE,
            ),
            zone_dwell: provider.get(PATH_VICTORY_ZONE_DWELL, DEFAULT_VICTORY_ZONE_DWELL),
            harmony_balance: provider.get(
                PATH_VICTORY_HARMONY_BALANCE,
                DEFAULT_VICTORY_HARMONY_BALANCE,
            ),
            harmony_elements: provider.get(
                PATH_VICTORY_HARMONY_ELEMENTS,
                DEFAULT_VICTORY_HARMONY_ELEMENTS,
            ),
            steward_qi: provider.get(PATH_VICTORY_STEWARD_QI, DEFAULT_VICTORY_STEWARD_QI),
            steward_sincerity: provider.get(
                PATH_VICTORY_STEWARD_SINCERITY,
                DEFAULT_VICTORY_STEWARD_SINCERITY,
            ),
            steward_merit: provider.get(PATH_VICTORY_STEWARD_MERIT, DEFAULT_VICTORY_STEWARD_MERIT),
            wuwei_sincerity: provider.get(
                PATH_VICTORY_WUWEI_SINCERITY,
                DEFAULT_VICTORY_WUWEI_SINCERITY,
            ),
            wuwei_balance: provider.get(PATH_VICTORY_WUWEI_BALANCE, DEFAULT_VICTORY_WUWEI_BALANCE),
            scholar_gua: provider.get(PATH_VICTORY_SCHOLAR_GUA, DEFAULT_VICTORY_SCHOLAR_GUA),
            scholar_merit: provider.get(PATH_VICTORY_SCHOLAR_MERIT, DEFAULT_VICTORY_SCHOLAR_MERIT),
            perfection_qi: provider.get(PATH_VICTORY_PERFECTION_QI, DEFAULT_VICTORY_PERFECTION_QI),
            perfection_merit: provider.get(
                PATH_VICTORY_PERFECTION_MERIT,
                DEFAULT_VICTORY_PERFECTION_MERIT,
            ),
            perfection_sincerity: provider.get(
                PATH_VICTORY_PERFECTION_SINCERITY,
                DEFAULT_VICTORY_PERFECTION_SINCERITY,
            ),
            prophet_divinations: provider.get(
                PATH_VICTORY_PROPHET_DIVINATIONS,
                DEFAULT_VICTORY_PROPHET_DIVINATIONS,
            ),
            prophet_accuracy: provider.get(
                PATH_VICTORY_PROPHET_ACCURACY,
                DEFAULT_VICTORY_PROPHET_ACCURACY,
            ),
            flux_transformations: provider.get(
                PATH_VICTORY_FLUX_TRANSFORMATIONS,
                DEFAULT_VICTORY_FLUX_TRANSFORMATIONS,
            ),
            flux_affinity_total: provider.get(
                PATH_VICTORY_FLUX_AFFINITY_TOTAL,
                DEFAULT_VICTORY_FLUX_AFFINITY_TOTAL,
            ),
        }
    }
}

/// Every way a game can be won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryCondition {
    GreatDao,
    TaijiMaster,
    FiveElements,
    OracleMaster,
    WisdomMentor,
    WayOfChange,
    HeavenHumanUnity,
    GuaMastery,
    Harmony,
    ResourceSteward,
    WuWei,
    Scholar,
    Perfection,
    Prophet,
    ChangeMaster,
}

impl VictoryCondition {
    pub const ALL: [Self; 15] = [
        Self::GreatDao,
        Self::TaijiMaster,
        Self::FiveElements,
        Self::OracleMaster,
        Self::WisdomMentor,
        Self::WayOfChange,
        Self::HeavenHumanUnity,
        Self::GuaMastery,
        Self::Harmony,
        Self::ResourceSteward,
        Self::WuWei,
        Self::Scholar,
        Self::Perfection,
        Self::Prophet,
        Self::ChangeMaster,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::GreatDao => "great_dao",
            Self::TaijiMaster => "taiji_master",
            Self::FiveElements => "five_elements",
            Self::OracleMaster => "oracle_master",
            Self::WisdomMentor => "wisdom_mentor",
            Self::WayOfChange => "way_of_change",
            Self::HeavenHumanUnity => "heaven_human_unity",
            Self::GuaMastery => "gua_mastery",
            Self::Harmony => "harmony",
            Self::ResourceSteward => "resource_steward",
            Self::WuWei => "wu_wei",
            Self::Scholar => "scholar",
            Self::Perfection => "perfection",
            Self::Prophet => "prophet",
            Self::ChangeMaster => "change_master",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GreatDao => "Deep merit reveals that the great Dao is simple.",
            Self::TaijiMaster => "Yin and yang held in balance by a seasoned practitioner.",
            Self::FiveElements => "Every element cultivated to fullness.",
            Self::OracleMaster => "Many divinations, almost all of them true.",
            Self::WisdomMentor => "A wide collection of activated wisdom.",
            Self::WayOfChange => "Countless transformations without losing balance.",
            Self::HeavenHumanUnity => "Long practice in heaven, among people and on earth.",
            Self::GuaMastery => "All eight basic trigrams mastered.",
            Self::Harmony => "Balanced polarity and several elements in harmony.",
            Self::ResourceSteward => "Ample qi, sincerity and merit held together.",
            Self::WuWei => "Supreme sincerity with near perfect balance.",
            Self::Scholar => "Broad study of many gua backed by merit.",
            Self::Perfection => "Qi, merit and sincerity all at their height.",
            Self::Prophet => "Long record of precise divination.",
            Self::ChangeMaster => "Mastery of change and of the elements.",
        }
    }

    /// Human-readable requirement with the configured numbers filled in.
    #[must_use]
    pub fn requirement(self, thresholds: &VictoryThresholds) -> String {
        let t = thresholds;
        match self {
            Self::GreatDao => format!("merit >= {}", t.merit),
            Self::TaijiMaster => format!(
                "balance >= {} and merit >= {}",
                t.taiji_balance, t.taiji_merit
            ),
            Self::FiveElements => format!("every elemental affinity >= {}", t.element),
            Self::OracleMaster => format!(
                "divinations >= {} and accuracy > {}",
                t.oracle_divinations, t.oracle_accuracy
            ),
            Self::WisdomMentor => format!("distinct wisdom >= {}", t.wisdom),
            Self::WayOfChange => format!(
                "transformations >= {} and balance >= {}",
                t.change_transformations, t.change_balance
            ),
            Self::HeavenHumanUnity => format!("turns in each zone >= {}", t.zone_dwell),
            Self::GuaMastery => "all 8 basic trigrams mastered".to_string(),
            Self::Harmony => format!(
                "balance >= {} and elements at {} >= {}",
                t.harmony_balance, t.element, t.harmony_elements
            ),
            Self::ResourceSteward => format!(
                "qi >= {} and sincerity >= {} and merit >= {}",
                t.steward_qi, t.steward_sincerity, t.steward_merit
            ),
            Self::WuWei => format!(
                "sincerity >= {} and balance >= {}",
                t.wuwei_sincerity, t.wuwei_balance
            ),
            Self::Scholar => format!(
                "mastered gua >= {} and merit >= {}",
                t.scholar_gua, t.scholar_merit
            ),
            Self::Perfection => format!(
                "qi >= {} and merit >= {} and sincerity >= {}",
                t.perfection_qi, t.perfection_merit, t.perfection_sincerity
            ),
            Self::Prophet => format!(
                "divinations >= {} and accuracy >= {}",
                t.prophet_divinations, t.prophet_accuracy
            ),
            Self::ChangeMaster => format!(
                "transformations >= {} and affinity total >= {}",
                t.flux_transformations, t.flux_affinity_total
            ),
        }
    }

    /// Whether this condition currently holds.
    #[must_use]
    pub fn is_met(
        self,
        player: &Player,
        tracker: &VictoryTracker,
        thresholds: &VictoryThresholds,
    ) -> bool {
        self.progress(player, tracker, thresholds).satisfied
    }

    /// Satisfaction plus a `[0, 1]` progress fraction.
    #[must_use]
    pub fn progress(
        self,
        player: &Player,
        tracker: &VictoryTracker,
        thresholds: &VictoryThresholds,
    ) -> VictoryProgress {
        let t = thresholds;
        let r = &player.resources;
        let ratio = balance_ratio(r.yin, r.yang);
        let accuracy = tracker.accuracy();
        let elements_at = r.affinities.count_at_least(t.element);
        let (satisfied, fraction) = match self {
            Self::GreatDao => (r.merit >= t.merit, count_fraction(r.merit, t.merit)),
            Self::TaijiMaster => (
                ratio >= t.taiji_balance && r.merit >= t.taiji_merit,
                ratio_fraction(ratio, t.taiji_balance).min(count_fraction(r.merit, t.taiji_merit)),
            ),
            Self::FiveElements => (
                elements_at == r.affinities.iter().count(),
                usize_to_f64(elements_at) / usize_to_f64(r.affinities.iter().count()),
            ),
            Self::OracleMaster => (
                tracker.divinations() >= t.oracle_divinations && accuracy > t.oracle_accuracy,
                count_fraction(tracker.divinations(), t.oracle_divinations)
                    .min(ratio_fraction(accuracy, t.oracle_accuracy)),
            ),
            Self::WisdomMentor => (
                tracker.wisdom().len() >= t.wisdom,
                len_fraction(tracker.wisdom().len(), t.wisdom),
            ),
            Self::WayOfChange => (
                tracker.transformations() >= t.change_transformations && ratio >= t.change_balance,
                count_fraction(tracker.transformations(), t.change_transformations)
                    .min(ratio_fraction(ratio, t.change_balance)),
            ),
            Self::HeavenHumanUnity => (
                tracker.min_dwell() >= t.zone_dwell,
                count_fraction(tracker.min_dwell(), t.zone_dwell),
            ),
            Self::GuaMastery => (
                tracker.basic_gua_mastered() == Trigram::ALL.len(),
                len_fraction(tracker.basic_gua_mastered(), Trigram::ALL.len()),
            ),
            Self::Harmony => (
                ratio >= t.harmony_balance && elements_at >= t.harmony_elements,
                ratio_fraction(ratio, t.harmony_balance)
                    .min(len_fraction(elements_at, t.harmony_elements)),
            ),
            Self::ResourceSteward => (
                r.qi >= t.steward_qi
                    && r.sincerity >= t.steward_sincerity
                    && r.merit >= t.steward_merit,
                count_fraction(r.qi, t.steward_qi)
                    .min(count_fraction(r.sincerity, t.steward_sincerity))
                    .min(count_fraction(r.merit, t.steward_merit)),
            ),
            Self::WuWei => (
                r.sincerity >= t.wuwei_sincerity && ratio >= t.wuwei_balance,
                count_fraction(r.sincerity, t.wuwei_sincerity)
                    .min(ratio_fraction(ratio, t.wuwei_balance)),
            ),
            Self::Scholar => (
                tracker.mastered().len() >= t.scholar_gua && r.merit >= t.scholar_merit,
                len_fraction(tracker.mastered().len(), t.scholar_gua)
                    .min(count_fraction(r.merit, t.scholar_merit)),
            ),
            Self::Perfection => (
                r.qi >= t.perfection_qi
                    && r.merit >= t.perfection_merit
                    && r.sincerity >= t.perfection_sincerity,
                count_fraction(r.qi, t.perfection_qi)
                    .min(count_fraction(r.merit, t.perfection_merit))
                    .min(count_fraction(r.sincerity, t.perfection_sincerity)),
            ),
            Self::Prophet => (
                tracker.divinations() >= t.prophet_divinations && accuracy >= t.prophet_accuracy,
                count_fraction(tracker.divinations(), t.prophet_divinations)
                    .min(ratio_fraction(accuracy, t.prophet_accuracy)),
            ),
            Self::ChangeMaster => (
                tracker.transformations() >= t.flux_transformations
                    && r.affinities.total() >= t.flux_affinity_total,
                count_fraction(tracker.transformations(), t.flux_transformations)
                    .min(count_fraction(r.affinities.total(), t.flux_affinity_total)),
            ),
        };
        VictoryProgress {
            condition: self,
            fraction: if satisfied { 1.0 } else { fraction.min(1.0) },
            satisfied,
        }
    }
}

impl fmt::Display for VictoryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VictoryCondition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.id() == s)
            .ok_or(())
    }
}

fn ratio_fraction(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 1.0;
    }
    (value / threshold).clamp(0.0, 1.0)
}

fn count_fraction(value: u32, threshold: u32) -> f64 {
    ratio_fraction(u32_to_f64(value), u32_to_f64(threshold))
}

fn len_fraction(value: usize, threshold: usize) -> f64 {
    ratio_fraction(usize_to_f64(value), usize_to_f64(threshold))
}

/// Progress toward a single condition, for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictoryProgress {
    pub condition: VictoryCondition,
    pub fraction: f64,
    pub satisfied: bool,
}

impl VictoryProgress {
    /// Progress for every condition, in [`VictoryCondition::ALL`] order.
    #[must_use]
    pub fn report(
        player: &Player,
        tracker: &VictoryTracker,
        thresholds: &VictoryThresholds,
    ) -> Vec<Self> {
        VictoryCondition::ALL
            .into_iter()
            .map(|condition| condition.progress(player, tracker, thresholds))
            .collect()
    }
}

/// Every condition that currently holds for `player`.
#[must_use]
pub fn evaluate(
    player: &Player,
    tracker: &VictoryTracker,
    thresholds: &VictoryThresholds,
) -> BTreeSet<VictoryCondition> {
    VictoryCondition::ALL
        .into_iter()
        .filter(|condition| condition.is_met(player, tracker, thresholds))
        .collect()
}

/// Per-player trackers, created on first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryRegistry {
    trackers: BTreeMap<String, VictoryTracker>,
}

impl VictoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for `name`, created with zeroed counters if absent.
    pub fn tracker_mut(&mut self, name: &str) -> &mut VictoryTracker {
        self.trackers.entry(name.to_string()).or_default()
    }

    #[must_use]
    pub fn tracker(&self, name: &str) -> Option<&VictoryTracker> {
        self.trackers.get(name)
    }

    /// Satisfied conditions for one player.
    pub fn check(
        &mut self,
        player: &Player,
        thresholds: &VictoryThresholds,
    ) -> BTreeSet<VictoryCondition> {
        evaluate(player, self.tracker_mut(&player.name), thresholds)
    }

    /// Satisfied conditions per player; players with nothing satisfied are omitted.
    pub fn check_all<'a>(
        &mut self,
        players: impl IntoIterator<Item = &'a Player>,
        thresholds: &VictoryThresholds,
    ) -> BTreeMap<String, BTreeSet<VictoryCondition>> {
        players
            .into_iter()
            .filter_map(|player| {
                let won = self.check(player, thresholds);
                (!won.is_empty()).then(|| (player.name.clone(), won))
            })
            .collect()
    }
}
