//! Resource ledger: per-player scalar counters with configured caps.
//!
//! Every write goes through [`Resources::apply_delta`], which clamps the
//! result into `[0, cap]` silently. Callers that must refuse an unaffordable
//! spend check [`Resources::can_afford`] first.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigProvider;
use crate::constants::{
    DEFAULT_INITIAL_AFFINITY, DEFAULT_INITIAL_HAND_SIZE, DEFAULT_INITIAL_MERIT, DEFAULT_INITIAL_QI,
    DEFAULT_INITIAL_SINCERITY, DEFAULT_INITIAL_YANG, DEFAULT_INITIAL_YIN, DEFAULT_MAX_AFFINITY,
    DEFAULT_MAX_HAND_SIZE, DEFAULT_MAX_MERIT, DEFAULT_MAX_QI, DEFAULT_MAX_SINCERITY,
    DEFAULT_MAX_YANG, DEFAULT_MAX_YIN, PATH_INITIAL_AFFINITY, PATH_INITIAL_HAND_SIZE,
    PATH_INITIAL_MERIT, PATH_INITIAL_QI, PATH_INITIAL_SINCERITY, PATH_INITIAL_YANG,
    PATH_INITIAL_YIN, PATH_MAX_AFFINITY, PATH_MAX_HAND_SIZE, PATH_MAX_MERIT, PATH_MAX_QI,
    PATH_MAX_SINCERITY, PATH_MAX_YANG, PATH_MAX_YIN,
};
use crate::numbers::clamp_i64_to_u32;

/// The five elements (Wu Xing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub const ALL: [Self; 5] = [Self::Metal, Self::Wood, Self::Water, Self::Fire, Self::Earth];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metal => "metal",
            Self::Wood => "wood",
            Self::Water => "water",
            Self::Fire => "fire",
            Self::Earth => "earth",
        }
    }

    /// Element fed by this one in the generating cycle.
    #[must_use]
    pub const fn generates(self) -> Self {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// Element restrained by this one in the overcoming cycle.
    #[must_use]
    pub const fn overcomes(self) -> Self {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metal" => Ok(Self::Metal),
            "wood" => Ok(Self::Wood),
            "water" => Ok(Self::Water),
            "fire" => Ok(Self::Fire),
            "earth" => Ok(Self::Earth),
            _ => Err(()),
        }
    }
}

/// Yin or yang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yin,
    Yang,
}

impl Polarity {
    #[must_use]
    pub const fn resource(self) -> Resource {
        match self {
            Self::Yin => Resource::Yin,
            Self::Yang => Resource::Yang,
        }
    }
}

/// Addressable ledger counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Qi,
    Merit,
    Sincerity,
    Yin,
    Yang,
    Affinity(Element),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qi => f.write_str("qi"),
            Self::Merit => f.write_str("merit"),
            Self::Sincerity => f.write_str("sincerity"),
            Self::Yin => f.write_str("yin"),
            Self::Yang => f.write_str("yang"),
            Self::Affinity(element) => write!(f, "affinity.{element}"),
        }
    }
}

/// Upper bound for every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCaps {
    pub qi: u32,
    pub merit: u32,
    pub sincerity: u32,
    pub yin: u32,
    pub yang: u32,
    pub affinity: u32,
    pub hand_size: usize,
}

impl Default for ResourceCaps {
    fn default() -> Self {
        Self {
            qi: DEFAULT_MAX_QI,
            merit: DEFAULT_MAX_MERIT,
            sincerity: DEFAULT_MAX_SINCERITY,
            yin: DEFAULT_MAX_YIN,
            yang: DEFAULT_MAX_YANG,
            affinity: DEFAULT_MAX_AFFINITY,
            hand_size: DEFAULT_MAX_HAND_SIZE,
        }
    }
}

impl ResourceCaps {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            qi: provider.get(PATH_MAX_QI, DEFAULT_MAX_QI),
            merit: provider.get(PATH_MAX_MERIT, DEFAULT_MAX_MERIT),
            sincerity: provider.get(PATH_MAX_SINCERITY, DEFAULT_MAX_SINCERITY),
            yin: provider.get(PATH_MAX_YIN, DEFAULT_MAX_YIN),
            yang: provider.get(PATH_MAX_YANG, DEFAULT_MAX_YANG),
            affinity: provider.get(PATH_MAX_AFFINITY, DEFAULT_MAX_AFFINITY),
            hand_size: provider.get(PATH_MAX_HAND_SIZE, DEFAULT_MAX_HAND_SIZE),
        }
    }

    #[must_use]
    pub const fn cap(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Qi => self.qi,
            Resource::Merit => self.merit,
            Resource::Sincerity => self.sincerity,
            Resource::Yin => self.yin,
            Resource::Yang => self.yang,
            Resource::Affinity(_) => self.affinity,
        }
    }
}

/// Starting values for a freshly seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialResources {
    pub qi: u32,
    pub merit: u32,
    pub sincerity: u32,
    pub yin: u32,
    pub yang: u32,
    pub affinity: u32,
    pub hand_size: usize,
}

impl Default for InitialResources {
    fn default() -> Self {
        Self {
            qi: DEFAULT_INITIAL_QI,
            merit: DEFAULT_INITIAL_MERIT,
            sincerity: DEFAULT_INITIAL_SINCERITY,
            yin: DEFAULT_INITIAL_YIN,
            yang: DEFAULT_INITIAL_YANG,
            affinity: DEFAULT_INITIAL_AFFINITY,
            hand_size: DEFAULT_INITIAL_HAND_SIZE,
        }
    }
}

impl InitialResources {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            qi: provider.get(PATH_INITIAL_QI, DEFAULT_INITIAL_QI),
            merit: provider.get(PATH_INITIAL_MERIT, DEFAULT_INITIAL_MERIT),
            sincerity: provider.get(PATH_INITIAL_SINCERITY, DEFAULT_INITIAL_SINCERITY),
            yin: provider.get(PATH_INITIAL_YIN, DEFAULT_INITIAL_YIN),
            yang: provider.get(PATH_INITIAL_YANG, DEFAULT_INITIAL_YANG),
            affinity: provider.get(PATH_INITIAL_AFFINITY, DEFAULT_INITIAL_AFFINITY),
            hand_size: provider.get(PATH_INITIAL_HAND_SIZE, DEFAULT_INITIAL_HAND_SIZE),
        }
    }
}

/// Affinity toward each of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Affinities {
    #[serde(default)]
    pub metal: u32,
    #[serde(default)]
    pub wood: u32,
    #[serde(default)]
    pub water: u32,
    #[serde(default)]
    pub fire: u32,
    #[serde(default)]
    pub earth: u32,
}

impl Affinities {
    #[must_use]
    pub const fn uniform(value: u32) -> Self {
        Self {
            metal: value,
            wood: value,
            water: value,
            fire: value,
            earth: value,
        }
    }

    #[must_use]
    pub const fn get(&self, element: Element) -> u32 {
        match element {
            Element::Metal => self.metal,
            Element::Wood => self.wood,
            Element::Water => self.water,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
        }
    }

    pub const fn get_mut(&mut self, element: Element) -> &mut u32 {
        match element {
            Element::Metal => &mut self.metal,
            Element::Wood => &mut self.wood,
            Element::Water => &mut self.water,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        Element::ALL.into_iter().map(|element| (element, self.get(element)))
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, value)| value).sum()
    }

    /// Number of elements whose affinity is at least `threshold`.
    #[must_use]
    pub fn count_at_least(&self, threshold: u32) -> usize {
        self.iter().filter(|(_, value)| *value >= threshold).count()
    }

    /// Highest affinity; ties resolve to the earliest element in [`Element::ALL`].
    #[must_use]
    pub fn dominant(&self) -> (Element, u32) {
        self.iter()
            .fold((Element::Metal, self.metal), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            })
    }
}

/// Result of a single ledger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaOutcome {
    pub resource: Resource,
    pub before: u32,
    pub after: u32,
    pub requested: i32,
}

impl DeltaOutcome {
    /// Portion of the requested delta discarded by clamping.
    #[must_use]
    pub fn clamped(&self) -> i64 {
        i64::from(self.requested) - (i64::from(self.after) - i64::from(self.before))
    }
}

/// Player counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Resources {
    #[serde(default)]
    pub qi: u32,
    #[serde(default)]
    pub merit: u32,
    #[serde(default)]
    pub sincerity: u32,
    #[serde(default)]
    pub yin: u32,
    #[serde(default)]
    pub yang: u32,
    #[serde(default)]
    pub affinities: Affinities,
}

impl Resources {
    /// Starting counters, clamped to the caps in case the two disagree.
    #[must_use]
    pub fn starting(initial: &InitialResources, caps: &ResourceCaps) -> Self {
        let mut resources = Self {
            qi: initial.qi,
            merit: initial.merit,
            sincerity: initial.sincerity,
            yin: initial.yin,
            yang: initial.yang,
            affinities: Affinities::uniform(initial.affinity),
        };
        resources.clamp(caps);
        resources
    }

    #[must_use]
    pub const fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Qi => self.qi,
            Resource::Merit => self.merit,
            Resource::Sincerity => self.sincerity,
            Resource::Yin => self.yin,
            Resource::Yang => self.yang,
            Resource::Affinity(element) => self.affinities.get(element),
        }
    }

    const fn slot(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Qi => &mut self.qi,
            Resource::Merit => &mut self.merit,
            Resource::Sincerity => &mut self.sincerity,
            Resource::Yin => &mut self.yin,
            Resource::Yang => &mut self.yang,
            Resource::Affinity(element) => self.affinities.get_mut(element),
        }
    }

    /// Add `delta` to `resource` and clamp into `[0, cap]`. Overflow and
    /// underflow are absorbed without error.
    pub fn apply_delta(
        &mut self,
        resource: Resource,
        delta: i32,
        caps: &ResourceCaps,
    ) -> DeltaOutcome {
        let cap = caps.cap(resource);
        let slot = self.slot(resource);
        let before = *slot;
        let after = clamp_i64_to_u32(i64::from(before) + i64::from(delta), cap);
        *slot = after;
        let outcome = DeltaOutcome {
            resource,
            before,
            after,
            requested: delta,
        };
        if outcome.clamped() != 0 {
            log::debug!("{resource} delta {delta} clamped: {before} -> {after} (cap {cap})");
        }
        outcome
    }

    #[must_use]
    pub const fn can_afford(&self, resource: Resource, cost: u32) -> bool {
        self.get(resource) >= cost
    }

    /// Pull every counter back inside its cap.
    pub fn clamp(&mut self, caps: &ResourceCaps) {
        self.qi = self.qi.min(caps.qi);
        self.merit = self.merit.min(caps.merit);
        self.sincerity = self.sincerity.min(caps.sincerity);
        self.yin = self.yin.min(caps.yin);
        self.yang = self.yang.min(caps.yang);
        for element in Element::ALL {
            let slot = self.affinities.get_mut(element);
            *slot = (*slot).min(caps.affinity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_clamps_both_ends() {
        let caps = ResourceCaps::default();
        let mut resources = Resources::default();

        let up = resources.apply_delta(Resource::Qi, 100, &caps);
        assert_eq!(up.after, caps.qi);
        assert_eq!(up.clamped(), 100 - i64::from(caps.qi));

        let down = resources.apply_delta(Resource::Qi, -1_000, &caps);
        assert_eq!(down.before, caps.qi);
        assert_eq!(down.after, 0);
        assert_eq!(resources.qi, 0);

        resources.apply_delta(Resource::Affinity(Element::Fire), i32::MAX, &caps);
        assert_eq!(resources.affinities.fire, caps.affinity);
        resources.apply_delta(Resource::Affinity(Element::Fire), i32::MIN, &caps);
        assert_eq!(resources.affinities.fire, 0);
    }

    #[test]
    fn exact_deltas_are_not_clamped() {
        let caps = ResourceCaps::default();
        let mut resources = Resources::default();
        let outcome = resources.apply_delta(Resource::Merit, 5, &caps);
        assert_eq!(outcome.clamped(), 0);
        assert_eq!(resources.get(Resource::Merit), 5);
    }

    #[test]
    fn starting_resources_respect_caps() {
        let initial = InitialResources {
            qi: 99,
            ..InitialResources::default()
        };
        let resources = Resources::starting(&initial, &ResourceCaps::default());
        assert_eq!(resources.qi, DEFAULT_MAX_QI);
        assert_eq!(resources.merit, DEFAULT_INITIAL_MERIT);
        assert_eq!(resources.sincerity, DEFAULT_INITIAL_SINCERITY);
    }

    #[test]
    fn element_cycles_close() {
        for element in Element::ALL {
            let mut cursor = element;
            for _ in 0..5 {
                cursor = cursor.generates();
            }
            assert_eq!(cursor, element);
            assert_ne!(element.generates(), element.overcomes());
        }
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Metal.overcomes(), Element::Wood);
        assert_eq!("water".parse::<Element>(), Ok(Element::Water));
    }

    #[test]
    fn affinity_queries() {
        let affinities = Affinities {
            metal: 3,
            wood: 5,
            water: 1,
            fire: 5,
            earth: 0,
        };
        assert_eq!(affinities.total(), 14);
        assert_eq!(affinities.count_at_least(3), 3);
        assert_eq!(affinities.dominant(), (Element::Wood, 5));
    }

    #[test]
    fn caps_load_from_provider() {
        let provider = ConfigProvider::from_json_str(
            r#"{"resource_limits": {"max_qi": 30, "max_affinity": 6}}"#,
        );
        let caps = ResourceCaps::from_provider(&provider);
        assert_eq!(caps.qi, 30);
        assert_eq!(caps.affinity, 6);
        assert_eq!(caps.merit, DEFAULT_MAX_MERIT);
    }
}
