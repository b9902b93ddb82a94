//! Seated players and the three cultivation zones.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cards::Card;
use crate::resources::{InitialResources, ResourceCaps, Resources};

/// Position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Earth,
    Human,
    Heaven,
}

impl Zone {
    pub const ALL: [Self; 3] = [Self::Earth, Self::Human, Self::Heaven];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earth => "earth",
            Self::Human => "human",
            Self::Heaven => "heaven",
        }
    }

    /// Extra action points granted while standing here.
    #[must_use]
    pub const fn action_point_bonus(self) -> u32 {
        match self {
            Self::Earth => 0,
            Self::Human => 1,
            Self::Heaven => 2,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earth" => Ok(Self::Earth),
            "human" => Ok(Self::Human),
            "heaven" => Ok(Self::Heaven),
            _ => Err(()),
        }
    }
}

/// One participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub resources: Resources,
    #[serde(default)]
    pub hand: Vec<Card>,
    pub zone: Zone,
}

impl Player {
    /// Seat a player in the earth zone with starting counters and an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>, initial: &InitialResources, caps: &ResourceCaps) -> Self {
        Self {
            name: name.into(),
            resources: Resources::starting(initial, caps),
            hand: Vec::new(),
            zone: Zone::Earth,
        }
    }

    /// Append a card unless the hand is already at `limit`.
    pub fn add_card(&mut self, card: Card, limit: usize) -> bool {
        if self.hand.len() >= limit {
            return false;
        }
        self.hand.push(card);
        true
    }

    /// Remove and return the card at `index`.
    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }
}
