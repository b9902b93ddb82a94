//! Yijing Game Engine
//!
//! Platform-agnostic rules engine for the Yijing card game: resource ledger,
//! yin/yang balance, Wu Xing affinities, cards and victory evaluation.
//! This crate never renders or prints; presentation layers poll the
//! read-only accessors on [`GameSession`].

pub mod actions;
pub mod balance;
pub mod bot;
pub mod cards;
pub mod config;
pub mod constants;
pub mod effects;
pub mod numbers;
pub mod player;
pub mod resources;
pub mod session;
pub mod victory;

// Re-export commonly used types
pub use actions::{
    Action, ActionCosts, ActionEnv, ActionError, ActionReport, TurnRules, action_points,
    available_actions, divination_chance, resolve,
};
pub use balance::{BalanceBand, BalanceReport, BalanceThresholds, balance_ratio};
pub use cards::{Card, CardCatalog, CardError, TASKS_PER_CARD, Task, Trigram};
pub use config::{ConfigError, ConfigProvider, GameConfig};
pub use effects::{Effect, apply_effects};
pub use player::{Player, Zone};
pub use resources::{
    Affinities, DeltaOutcome, Element, InitialResources, Polarity, Resource, ResourceCaps,
    Resources,
};
pub use session::{GameSession, JournalEntry, SessionState};
pub use victory::{
    VictoryCondition, VictoryProgress, VictoryRegistry, VictoryThresholds, VictoryTracker,
    evaluate,
};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the card catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<CardCatalog, Self::Error>;

    /// Load the configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<ConfigProvider, Self::Error>;
}

/// Loader serving the catalog and configuration compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLoader;

impl DataLoader for BundledLoader {
    type Error = std::convert::Infallible;

    fn load_catalog(&self) -> Result<CardCatalog, Self::Error> {
        Ok(CardCatalog::bundled())
    }

    fn load_config(&self) -> Result<ConfigProvider, Self::Error> {
        Ok(ConfigProvider::bundled())
    }
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save session state
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    fn save_game(&self, save_name: &str, state: &SessionState) -> Result<(), Self::Error>;

    /// Load session state
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<SessionState>, Self::Error>;

    /// Delete saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing game instances
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    fn load_rules(&self) -> Result<(GameConfig, CardCatalog), L::Error> {
        let provider = self.data_loader.load_config()?;
        let catalog = self.data_loader.load_catalog()?;
        Ok((GameConfig::from_provider(&provider), catalog))
    }

    /// Seat the named players in a fresh seeded session.
    ///
    /// # Errors
    ///
    /// Returns an error if data cannot be loaded or the roster is invalid.
    pub fn create_session<I, N>(&self, seed: u64, names: I) -> Result<GameSession, anyhow::Error>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
        L::Error: Into<anyhow::Error>,
    {
        let (config, catalog) = self.load_rules().map_err(Into::into)?;
        Ok(GameSession::new(seed, names, config, catalog)?)
    }

    /// Save a session
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn save_game(&self, save_name: &str, session: &GameSession) -> Result<(), S::Error> {
        self.storage.save_game(save_name, &session.snapshot())
    }

    /// Load a session
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded or rehydrated.
    pub fn load_game(&self, save_name: &str) -> Result<Option<GameSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(state) = self.storage.load_game(save_name).map_err(Into::into)? {
            // Rehydrate with fresh rules
            let (config, catalog) = self.load_rules().map_err(Into::into)?;
            Ok(Some(GameSession::from_state(state, config, catalog)))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_game(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}
