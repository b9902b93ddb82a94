//! Card and task catalog.
//!
//! A card is immutable once built and always carries exactly six tasks; the
//! invariant is enforced by [`Card::new`], which serde deserialization also
//! routes through.
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::effects::Effect;
use crate::player::Zone;
use crate::resources::{Element, Polarity};

const BUNDLED_CARDS: &str = include_str!("../assets/cards.json");

/// Number of tasks every card carries, one per line of the hexagram.
pub const TASKS_PER_CARD: usize = 6;

/// Errors raised while authoring or looking up cards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("card {name} must have exactly 6 tasks (got {found})")]
    TaskCount { name: String, found: usize },
    #[error("unknown card {0}")]
    UnknownCard(String),
}

/// The eight basic gua.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigram {
    Qian,
    Kun,
    Zhen,
    Xun,
    Kan,
    Li,
    Gen,
    Dui,
}

impl Trigram {
    pub const ALL: [Self; 8] = [
        Self::Qian,
        Self::Kun,
        Self::Zhen,
        Self::Xun,
        Self::Kan,
        Self::Li,
        Self::Gen,
        Self::Dui,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qian => "qian",
            Self::Kun => "kun",
            Self::Zhen => "zhen",
            Self::Xun => "xun",
            Self::Kan => "kan",
            Self::Li => "li",
            Self::Gen => "gen",
            Self::Dui => "dui",
        }
    }

    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Qian | Self::Zhen | Self::Kan | Self::Gen => Polarity::Yang,
            Self::Kun | Self::Xun | Self::Li | Self::Dui => Polarity::Yin,
        }
    }

    #[must_use]
    pub const fn element(self) -> Element {
        match self {
            Self::Qian | Self::Dui => Element::Metal,
            Self::Kun | Self::Gen => Element::Earth,
            Self::Zhen | Self::Xun => Element::Wood,
            Self::Kan => Element::Water,
            Self::Li => Element::Fire,
        }
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trigram {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigram| trigram.as_str() == s)
            .ok_or(())
    }
}

/// One line of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub position: Zone,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub merit_reward: u32,
    #[serde(default)]
    pub sincerity_reward: u32,
}

impl Task {
    #[must_use]
    pub fn new(
        position: Zone,
        name: impl Into<String>,
        description: impl Into<String>,
        merit_reward: u32,
        sincerity_reward: u32,
    ) -> Self {
        Self {
            position,
            name: name.into(),
            description: description.into(),
            merit_reward,
            sincerity_reward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardDef {
    name: String,
    trigrams: (Trigram, Trigram),
    tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    effects: Vec<Effect>,
}

/// A gua card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardDef", into = "CardDef")]
pub struct Card {
    name: String,
    trigrams: (Trigram, Trigram),
    tasks: [Task; TASKS_PER_CARD],
    effects: Vec<Effect>,
}

impl Card {
    /// Build a card.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TaskCount`] unless exactly six tasks are given.
    pub fn new(
        name: impl Into<String>,
        trigrams: (Trigram, Trigram),
        tasks: Vec<Task>,
    ) -> Result<Self, CardError> {
        let name = name.into();
        let tasks: [Task; TASKS_PER_CARD] =
            tasks
                .try_into()
                .map_err(|rejected: Vec<Task>| CardError::TaskCount {
                    name: name.clone(),
                    found: rejected.len(),
                })?;
        Ok(Self {
            name,
            trigrams,
            tasks,
            effects: Vec::new(),
        })
    }

    /// Attach authored bonus effects applied when the card is played.
    #[must_use]
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn trigrams(&self) -> (Trigram, Trigram) {
        self.trigrams
    }

    #[must_use]
    pub fn has_trigram(&self, trigram: Trigram) -> bool {
        self.trigrams.0 == trigram || self.trigrams.1 == trigram
    }

    #[must_use]
    pub const fn tasks(&self) -> &[Task; TASKS_PER_CARD] {
        &self.tasks
    }

    /// First task positioned in `zone`.
    #[must_use]
    pub fn task_for(&self, zone: Zone) -> Option<&Task> {
        self.tasks.iter().find(|task| task.position == zone)
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
}

impl TryFrom<CardDef> for Card {
    type Error = CardError;

    fn try_from(def: CardDef) -> Result<Self, Self::Error> {
        Ok(Self::new(def.name, def.trigrams, def.tasks)?.with_effects(def.effects))
    }
}

impl From<Card> for CardDef {
    fn from(card: Card) -> Self {
        Self {
            name: card.name,
            trigrams: card.trigrams,
            tasks: card.tasks.into(),
            effects: card.effects,
        }
    }
}

/// Container for every authored card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardCatalog {
    pub cards: Vec<Card>,
}

impl CardCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Load a catalog from JSON. Any card violating the six-task rule fails the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid cards.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Sample catalog compiled into the crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json_or_empty(BUNDLED_CARDS)
    }

    fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            log::warn!("card catalog rejected, using an empty catalog: {err}");
            Self::empty()
        })
    }

    /// Look up a card by name.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownCard`] if no card has that name.
    pub fn get(&self, name: &str) -> Result<&Card, CardError> {
        self.cards
            .iter()
            .find(|card| card.name == name)
            .ok_or_else(|| CardError::UnknownCard(name.to_string()))
    }

    /// Uniformly random card, or `None` for an empty catalog.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Card> {
        self.cards.choose(rng)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<'a> IntoIterator for &'a CardCatalog {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
