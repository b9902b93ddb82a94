//! Centralized defaults, configuration paths and journal keys for the rules engine.
//!
//! Every numeric threshold consumed by the ledger, the balance evaluator and the
//! victory evaluator has a dot-path into the configuration document and a
//! hard-coded fallback here. Lookups that miss the document land on these values.

// Journal keys -------------------------------------------------------------
pub(crate) const LOG_TURN_START: &str = "log.turn.start";
pub(crate) const LOG_TURN_END: &str = "log.turn.end";
pub(crate) const LOG_CARD_PLAYED: &str = "log.card.played";
pub(crate) const LOG_TASK_COMPLETED: &str = "log.card.task-completed";
pub(crate) const LOG_MOVED: &str = "log.zone.moved";
pub(crate) const LOG_STUDIED: &str = "log.study";
pub(crate) const LOG_STUDY_MERIT: &str = "log.study.merit";
pub(crate) const LOG_MEDITATED: &str = "log.meditate";
pub(crate) const LOG_TRANSFORMED: &str = "log.transform";
pub(crate) const LOG_DIVINE_SUCCESS: &str = "log.divine.success";
pub(crate) const LOG_DIVINE_FAILURE: &str = "log.divine.failure";
pub(crate) const LOG_CONSULTED: &str = "log.consult";
pub(crate) const LOG_BALANCE_BONUS: &str = "log.balance.bonus";
pub(crate) const LOG_BALANCE_PENALTY: &str = "log.balance.penalty";
pub(crate) const LOG_ELEMENT_GENERATES: &str = "log.element.generates";
pub(crate) const LOG_VICTORY: &str = "log.victory";

// Initial resources --------------------------------------------------------
pub const PATH_INITIAL_QI: &str = "initial_resources.qi";
pub const PATH_INITIAL_MERIT: &str = "initial_resources.merit";
pub const PATH_INITIAL_SINCERITY: &str = "initial_resources.sincerity";
pub const PATH_INITIAL_YIN: &str = "initial_resources.yin";
pub const PATH_INITIAL_YANG: &str = "initial_resources.yang";
pub const PATH_INITIAL_AFFINITY: &str = "initial_resources.affinity";
pub const PATH_INITIAL_HAND_SIZE: &str = "initial_resources.hand_size";

pub const DEFAULT_INITIAL_QI: u32 = 8;
pub const DEFAULT_INITIAL_MERIT: u32 = 1;
pub const DEFAULT_INITIAL_SINCERITY: u32 = 2;
pub const DEFAULT_INITIAL_YIN: u32 = 0;
pub const DEFAULT_INITIAL_YANG: u32 = 0;
pub const DEFAULT_INITIAL_AFFINITY: u32 = 0;
pub const DEFAULT_INITIAL_HAND_SIZE: usize = 3;

// Resource caps ------------------------------------------------------------
pub const PATH_MAX_QI: &str = "resource_limits.max_qi";
pub const PATH_MAX_MERIT: &str = "resource_limits.max_merit";
pub const PATH_MAX_SINCERITY: &str = "resource_limits.max_sincerity";
pub const PATH_MAX_YIN: &str = "resource_limits.max_yin";
pub const PATH_MAX_YANG: &str = "resource_limits.max_yang";
pub const PATH_MAX_AFFINITY: &str = "resource_limits.max_affinity";
pub const PATH_MAX_HAND_SIZE: &str = "resource_limits.max_hand_size";

pub const DEFAULT_MAX_QI: u32 = 25;
pub const DEFAULT_MAX_MERIT: u32 = 20;
pub const DEFAULT_MAX_SINCERITY: u32 = 15;
pub const DEFAULT_MAX_YIN: u32 = 20;
pub const DEFAULT_MAX_YANG: u32 = 20;
pub const DEFAULT_MAX_AFFINITY: u32 = 10;
pub const DEFAULT_MAX_HAND_SIZE: usize = 7;

// Action costs -------------------------------------------------------------
pub const PATH_COST_PLAY_CARD_QI: &str = "action_costs.play_card_qi";
pub const PATH_COST_MOVE_QI: &str = "action_costs.move_qi";
pub const PATH_COST_STUDY_QI: &str = "action_costs.study_qi";
pub const PATH_COST_DIVINE_QI: &str = "action_costs.divine_qi";
pub const PATH_COST_TRANSFORM_SINCERITY: &str = "action_costs.transform_sincerity";
pub const PATH_COST_CONSULT_MERIT: &str = "action_costs.consult_merit";

pub const DEFAULT_COST_PLAY_CARD_QI: u32 = 0;
pub const DEFAULT_COST_MOVE_QI: u32 = 1;
pub const DEFAULT_COST_STUDY_QI: u32 = 1;
pub const DEFAULT_COST_DIVINE_QI: u32 = 2;
pub const DEFAULT_COST_TRANSFORM_SINCERITY: u32 = 3;
pub const DEFAULT_COST_CONSULT_MERIT: u32 = 1;

// Balance bands ------------------------------------------------------------
pub const PATH_BALANCED_THRESHOLD: &str = "balance.balanced_threshold";
pub const PATH_MILD_THRESHOLD: &str = "balance.mild_threshold";
pub const PATH_SEVERE_SKEW: &str = "balance.severe_skew";
pub const PATH_BALANCED_QI_BONUS: &str = "balance.balanced_qi_bonus";
pub const PATH_MILD_QI_BONUS: &str = "balance.mild_qi_bonus";
pub const PATH_SEVERE_QI_PENALTY: &str = "balance.severe_qi_penalty";

pub const DEFAULT_BALANCED_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MILD_THRESHOLD: f64 = 0.5;
pub const DEFAULT_SEVERE_SKEW: f64 = 4.0;
pub const DEFAULT_BALANCED_QI_BONUS: u32 = 3;
pub const DEFAULT_MILD_QI_BONUS: u32 = 1;
pub const DEFAULT_SEVERE_QI_PENALTY: u32 = 2;

// Victory thresholds -------------------------------------------------------
pub const PATH_VICTORY_MERIT: &str = "victory.merit_threshold";
pub const PATH_VICTORY_TAIJI_BALANCE: &str = "victory.taiji_balance";
pub const PATH_VICTORY_TAIJI_MERIT: &str = "victory.taiji_merit";
pub const PATH_VICTORY_ELEMENT: &str = "victory.element_threshold";
pub const PATH_VICTORY_ORACLE_DIVINATIONS: &str = "victory.oracle_divinations";
pub const PATH_VICTORY_ORACLE_ACCURACY: &str = "victory.oracle_accuracy";
pub const PATH_VICTORY_WISDOM: &str = "victory.wisdom_count";
pub const PATH_VICTORY_CHANGE_TRANSFORMATIONS: &str = "victory.change_transformations";
pub const PATH_VICTORY_CHANGE_BALANCE: &str = "victory.change_balance";
pub const PATH_VICTORY_ZONE_DWELL: &str = "victory.zone_dwell";
pub const PATH_VICTORY_HARMONY_BALANCE: &str = "victory.harmony_balance";
pub const PATH_VICTORY_HARMONY_ELEMENTS: &str = "victory.harmony_elements";
pub const PATH_VICTORY_STEWARD_QI: &str = "victory.steward_qi";
pub const PATH_VICTORY_STEWARD_SINCERITY: &str = "victory.steward_sincerity";
pub const PATH_VICTORY_STEWARD_MERIT: &str = "victory.steward_merit";
pub const PATH_VICTORY_WUWEI_SINCERITY: &str = "victory.wuwei_sincerity";
pub const PATH_VICTORY_WUWEI_BALANCE: &str = "victory.wuwei_balance";
pub const PATH_VICTORY_SCHOLAR_GUA: &str = "victory.scholar_gua";
pub const PATH_VICTORY_SCHOLAR_MERIT: &str = "victory.scholar_merit";
pub const PATH_VICTORY_PERFECTION_QI: &str = "victory.perfection_qi";
pub const PATH_VICTORY_PERFECTION_MERIT: &str = "victory.perfection_merit";
pub const PATH_VICTORY_PERFECTION_SINCERITY: &str = "victory.perfection_sincerity";
pub const PATH_VICTORY_PROPHET_DIVINATIONS: &str = "victory.prophet_divinations";
pub const PATH_VICTORY_PROPHET_ACCURACY: &str = "victory.prophet_accuracy";
pub const PATH_VICTORY_FLUX_TRANSFORMATIONS: &str = "victory.flux_transformations";
pub const PATH_VICTORY_FLUX_AFFINITY_TOTAL: &str = "victory.flux_affinity_total";

pub const DEFAULT_VICTORY_MERIT: u32 = 12;
pub const DEFAULT_VICTORY_TAIJI_BALANCE: f64 = 0.8;
pub const DEFAULT_VICTORY_TAIJI_MERIT: u32 = 8;
pub const DEFAULT_VICTORY_ELEMENT: u32 = 3;
pub const DEFAULT_VICTORY_ORACLE_DIVINATIONS: u32 = 15;
pub const DEFAULT_VICTORY_ORACLE_ACCURACY: f64 = 0.8;
pub const DEFAULT_VICTORY_WISDOM: usize = 10;
pub const DEFAULT_VICTORY_CHANGE_TRANSFORMATIONS: u32 = 20;
pub const DEFAULT_VICTORY_CHANGE_BALANCE: f64 = 0.6;
pub const DEFAULT_VICTORY_ZONE_DWELL: u32 = 5;
pub const DEFAULT_VICTORY_HARMONY_BALANCE: f64 = 0.7;
pub const DEFAULT_VICTORY_HARMONY_ELEMENTS: usize = 3;
pub const DEFAULT_VICTORY_STEWARD_QI: u32 = 20;
pub const DEFAULT_VICTORY_STEWARD_SINCERITY: u32 = 10;
pub const DEFAULT_VICTORY_STEWARD_MERIT: u32 = 10;
pub const DEFAULT_VICTORY_WUWEI_SINCERITY: u32 = 15;
pub const DEFAULT_VICTORY_WUWEI_BALANCE: f64 = 0.9;
pub const DEFAULT_VICTORY_SCHOLAR_GUA: usize = 12;
pub const DEFAULT_VICTORY_SCHOLAR_MERIT: u32 = 8;
pub const DEFAULT_VICTORY_PERFECTION_QI: u32 = 25;
pub const DEFAULT_VICTORY_PERFECTION_MERIT: u32 = 12;
pub const DEFAULT_VICTORY_PERFECTION_SINCERITY: u32 = 12;
pub const DEFAULT_VICTORY_PROPHET_DIVINATIONS: u32 = 25;
pub const DEFAULT_VICTORY_PROPHET_ACCURACY: f64 = 0.9;
pub const DEFAULT_VICTORY_FLUX_TRANSFORMATIONS: u32 = 30;
pub const DEFAULT_VICTORY_FLUX_AFFINITY_TOTAL: u32 = 20;

// Turn rules ---------------------------------------------------------------
pub const PATH_BASE_ACTION_POINTS: &str = "turn.base_action_points";
pub const PATH_MAX_ACTION_POINTS: &str = "turn.max_action_points";
pub const PATH_DAILY_QI: &str = "turn.daily_qi";
pub const PATH_SINCERITY_AP_THRESHOLD: &str = "turn.sincerity_ap_threshold";
pub const PATH_SYNERGY_ELEMENTS: &str = "turn.synergy_elements";
pub const PATH_MAX_TURNS: &str = "turn.max_turns";

pub const DEFAULT_BASE_ACTION_POINTS: u32 = 3;
pub const DEFAULT_MAX_ACTION_POINTS: u32 = 5;
pub const DEFAULT_DAILY_QI: u32 = 1;
pub const DEFAULT_SINCERITY_AP_THRESHOLD: u32 = 5;
pub const DEFAULT_SYNERGY_ELEMENTS: usize = 3;
pub const DEFAULT_MAX_TURNS: u32 = 40;

// Action tuning ------------------------------------------------------------
pub(crate) const MEDITATE_BASE_QI: i32 = 3;
pub(crate) const STUDY_BASE_DRAW: usize = 2;
pub(crate) const STUDY_SPECIALIST_AFFINITY: u32 = 5;
pub(crate) const STUDY_MERIT_HAND_SMALL: usize = 5;
pub(crate) const STUDY_MERIT_HAND_LARGE: usize = 7;
pub(crate) const TRANSFORM_POLARITY_GAIN: i32 = 2;
pub(crate) const TRANSFORM_AFFINITY_GAIN: i32 = 2;
pub(crate) const DIVINE_BASE_CHANCE: f64 = 0.4;
pub(crate) const DIVINE_MERIT_STEP: f64 = 0.04;
pub(crate) const DIVINE_MAX_CHANCE: f64 = 0.9;
