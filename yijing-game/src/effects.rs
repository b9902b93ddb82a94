//! Card effects as a closed tagged variant.
//!
//! Effects are decided when a card is authored. Applying one never fails:
//! counter changes go through the clamped ledger and symbolic grants land in
//! the player's [`VictoryTracker`].
use serde::{Deserialize, Serialize};

use crate::constants::LOG_ELEMENT_GENERATES;
use crate::resources::{Element, Polarity, Resource, ResourceCaps, Resources};
use crate::victory::VictoryTracker;

/// A single authored effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Resource { resource: Resource, amount: i32 },
    Polarity { polarity: Polarity, amount: i32 },
    Affinity { element: Element, amount: i32 },
    Wisdom { id: String },
    Mastery { gua: String },
}

/// Limits consulted while applying effects.
#[derive(Debug, Clone, Copy)]
pub struct EffectLimits<'a> {
    pub caps: &'a ResourceCaps,
    /// Affinity level at which an element starts feeding the one it generates.
    pub element_threshold: u32,
}

/// Raise (or lower) an elemental affinity. When a gain leaves the affinity at
/// or above the element threshold, the generated element receives +1.
pub fn adjust_affinity(
    resources: &mut Resources,
    element: Element,
    amount: i32,
    limits: EffectLimits<'_>,
    events: &mut Vec<String>,
) {
    let outcome = resources.apply_delta(Resource::Affinity(element), amount, limits.caps);
    if amount > 0 && outcome.after >= limits.element_threshold {
        let fed = element.generates();
        resources.apply_delta(Resource::Affinity(fed), 1, limits.caps);
        log::debug!("{element} feeds {fed}");
        events.push(LOG_ELEMENT_GENERATES.to_string());
    }
}

impl Effect {
    /// Apply this effect to a player's ledger and tracker.
    pub fn apply(
        &self,
        resources: &mut Resources,
        tracker: &mut VictoryTracker,
        limits: EffectLimits<'_>,
        events: &mut Vec<String>,
    ) {
        match self {
            Self::Resource {
                resource: Resource::Affinity(element),
                amount,
            }
            | Self::Affinity { element, amount } => {
                adjust_affinity(resources, *element, *amount, limits, events);
            }
            Self::Resource { resource, amount } => {
                resources.apply_delta(*resource, *amount, limits.caps);
            }
            Self::Polarity { polarity, amount } => {
                resources.apply_delta(polarity.resource(), *amount, limits.caps);
            }
            Self::Wisdom { id } => tracker.add_wisdom(id.clone()),
            Self::Mastery { gua } => tracker.add_mastery(gua.clone()),
        }
    }
}

/// Apply every effect in order.
pub fn apply_effects(
    effects: &[Effect],
    resources: &mut Resources,
    tracker: &mut VictoryTracker,
    limits: EffectLimits<'_>,
    events: &mut Vec<String>,
) {
    for effect in effects {
        effect.apply(resources, tracker, limits, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(caps: &ResourceCaps) -> EffectLimits<'_> {
        EffectLimits {
            caps,
            element_threshold: 3,
        }
    }

    #[test]
    fn effects_deserialize_from_tagged_json() {
        let json = r#"[
            {"kind": "resource", "resource": "qi", "amount": 2},
            {"kind": "resource", "resource": {"affinity": "water"}, "amount": 1},
            {"kind": "polarity", "polarity": "yin", "amount": 1},
            {"kind": "wisdom", "id": "thunder"},
            {"kind": "mastery", "gua": "zhen"}
        ]"#;
        let effects: Vec<Effect> = serde_json::from_str(json).unwrap();
        assert_eq!(
            effects[1],
            Effect::Resource {
                resource: Resource::Affinity(Element::Water),
                amount: 1
            }
        );
        assert!(serde_json::from_str::<Effect>(r#"{"kind": "qi +2"}"#).is_err());
    }

    #[test]
    fn effects_route_through_ledger_and_tracker() {
        let caps = ResourceCaps::default();
        let mut resources = Resources::default();
        let mut tracker = VictoryTracker::default();
        let mut events = Vec::new();
        let effects = vec![
            Effect::Resource {
                resource: Resource::Qi,
                amount: 100,
            },
            Effect::Polarity {
                polarity: Polarity::Yang,
                amount: -3,
            },
            Effect::Wisdom {
                id: "thunder".to_string(),
            },
            Effect::Mastery {
                gua: "zhen".to_string(),
            },
        ];
        apply_effects(&effects, &mut resources, &mut tracker, limits(&caps), &mut events);
        assert_eq!(resources.qi, caps.qi);
        assert_eq!(resources.yang, 0);
        assert!(tracker.wisdom().contains("thunder"));
        assert!(tracker.mastered().contains("zhen"));
        assert!(events.is_empty());
    }

    #[test]
    fn reaching_element_threshold_feeds_generated_element() {
        let caps = ResourceCaps::default();
        let mut resources = Resources::default();
        let mut events = Vec::new();

        adjust_affinity(&mut resources, Element::Wood, 2, limits(&caps), &mut events);
        assert_eq!(resources.affinities.fire, 0);

        adjust_affinity(&mut resources, Element::Wood, 1, limits(&caps), &mut events);
        assert_eq!(resources.affinities.wood, 3);
        assert_eq!(resources.affinities.fire, 1);
        assert_eq!(events, vec![LOG_ELEMENT_GENERATES.to_string()]);

        adjust_affinity(&mut resources, Element::Wood, -1, limits(&caps), &mut events);
        assert_eq!(resources.affinities.fire, 1);
    }
}
