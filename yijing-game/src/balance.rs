//! Yin/yang balance evaluation.
//!
//! Everything here is pure; callers decide when to apply the qi adjustment
//! attached to a band.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigProvider;
use crate::constants::{
    DEFAULT_BALANCED_QI_BONUS, DEFAULT_BALANCED_THRESHOLD, DEFAULT_MILD_QI_BONUS,
    DEFAULT_MILD_THRESHOLD, DEFAULT_SEVERE_QI_PENALTY, DEFAULT_SEVERE_SKEW,
    PATH_BALANCED_QI_BONUS, PATH_BALANCED_THRESHOLD, PATH_MILD_QI_BONUS, PATH_MILD_THRESHOLD,
    PATH_SEVERE_QI_PENALTY, PATH_SEVERE_SKEW,
};
use crate::numbers::u32_to_delta;

/// Normalized balance in `[0, 1]`: `2 * min / (yin + yang)`.
///
/// Equal counters give 1.0 and a one-sided distribution gives 0.0. With no
/// yin or yang accrued the player is treated as perfectly balanced.
#[must_use]
pub fn balance_ratio(yin: u32, yang: u32) -> f64 {
    if yin == 0 && yang == 0 {
        return 1.0;
    }
    let total = f64::from(yin) + f64::from(yang);
    (2.0 * f64::from(yin.min(yang)) / total).clamp(0.0, 1.0)
}

/// `max / min`, infinite when only one side has accrued anything and 1.0 when
/// neither has.
#[must_use]
pub fn skew(yin: u32, yang: u32) -> f64 {
    let (low, high) = (yin.min(yang), yin.max(yang));
    match (low, high) {
        (_, 0) => 1.0,
        (0, _) => f64::INFINITY,
        _ => f64::from(high) / f64::from(low),
    }
}

/// Qualitative classification of a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceBand {
    Balanced,
    MildlySkewed,
    Skewed,
    SeverelySkewed,
}

impl BalanceBand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::MildlySkewed => "mildly_skewed",
            Self::Skewed => "skewed",
            Self::SeverelySkewed => "severely_skewed",
        }
    }
}

impl fmt::Display for BalanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band cutoffs and the qi attached to each band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceThresholds {
    pub balanced_threshold: f64,
    pub mild_threshold: f64,
    pub severe_skew: f64,
    pub balanced_qi_bonus: u32,
    pub mild_qi_bonus: u32,
    pub severe_qi_penalty: u32,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            balanced_threshold: DEFAULT_BALANCED_THRESHOLD,
            mild_threshold: DEFAULT_MILD_THRESHOLD,
            severe_skew: DEFAULT_SEVERE_SKEW,
            balanced_qi_bonus: DEFAULT_BALANCED_QI_BONUS,
            mild_qi_bonus: DEFAULT_MILD_QI_BONUS,
            severe_qi_penalty: DEFAULT_SEVERE_QI_PENALTY,
        }
    }
}

impl BalanceThresholds {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            balanced_threshold: provider.get(PATH_BALANCED_THRESHOLD, DEFAULT_BALANCED_THRESHOLD),
            mild_threshold: provider.get(PATH_MILD_THRESHOLD, DEFAULT_MILD_THRESHOLD),
            severe_skew: provider.get(PATH_SEVERE_SKEW, DEFAULT_SEVERE_SKEW),
            balanced_qi_bonus: provider.get(PATH_BALANCED_QI_BONUS, DEFAULT_BALANCED_QI_BONUS),
            mild_qi_bonus: provider.get(PATH_MILD_QI_BONUS, DEFAULT_MILD_QI_BONUS),
            severe_qi_penalty: provider.get(PATH_SEVERE_QI_PENALTY, DEFAULT_SEVERE_QI_PENALTY),
        }
    }

    /// Band for a yin/yang pair.
    #[must_use]
    pub fn classify(&self, yin: u32, yang: u32) -> BalanceBand {
        let ratio = balance_ratio(yin, yang);
        if ratio >= self.balanced_threshold {
            BalanceBand::Balanced
        } else if ratio >= self.mild_threshold {
            BalanceBand::MildlySkewed
        } else if skew(yin, yang) > self.severe_skew {
            BalanceBand::SeverelySkewed
        } else {
            BalanceBand::Skewed
        }
    }

    /// Signed qi change attached to a band.
    #[must_use]
    pub fn qi_adjustment(&self, band: BalanceBand) -> i32 {
        match band {
            BalanceBand::Balanced => u32_to_delta(self.balanced_qi_bonus),
            BalanceBand::MildlySkewed => u32_to_delta(self.mild_qi_bonus),
            BalanceBand::Skewed => 0,
            BalanceBand::SeverelySkewed => -u32_to_delta(self.severe_qi_penalty),
        }
    }
}

/// Read-only snapshot for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub yin: u32,
    pub yang: u32,
    pub ratio: f64,
    pub band: BalanceBand,
    pub qi_adjustment: i32,
}

impl BalanceReport {
    #[must_use]
    pub fn evaluate(yin: u32, yang: u32, thresholds: &BalanceThresholds) -> Self {
        let band = thresholds.classify(yin, yang);
        Self {
            yin,
            yang,
            ratio: balance_ratio(yin, yang),
            band,
            qi_adjustment: thresholds.qi_adjustment(band),
        }
    }
}
