//! Rule-based opponent.
use crate::actions::{Action, available_actions};
use crate::config::GameConfig;
use crate::player::Player;

/// First non-pass entry of an ordered menu, or [`Action::Pass`].
#[must_use]
pub fn choose(menu: &[Action]) -> Action {
    menu.iter()
        .copied()
        .find(|action| !action.is_pass())
        .unwrap_or(Action::Pass)
}

/// Pick the bot's next action for `player`.
#[must_use]
pub fn decide(player: &Player, config: &GameConfig, remaining: u32) -> Action {
    choose(&available_actions(player, config, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, Trigram};
    use crate::player::Zone;

    #[test]
    fn picks_first_non_pass() {
        assert_eq!(choose(&[Action::Pass, Action::Study]), Action::Study);
        assert_eq!(choose(&[Action::Pass]), Action::Pass);
        assert_eq!(choose(&[]), Action::Pass);
    }

    #[test]
    fn prefers_playing_cards_then_moving() {
        let config = GameConfig::default();
        let mut player = Player::new("Bot", &config.initial, &config.caps);
        assert_eq!(
            decide(&player, &config, 2),
            Action::Move { zone: Zone::Human }
        );
        let catalog = CardCatalog::bundled();
        player.hand.push(catalog.get("Kun as Earth").unwrap().clone());
        assert_eq!(
            decide(&player, &config, 2),
            Action::PlayCard {
                card: 0,
                trigram: Trigram::Kun
            }
        );
        assert_eq!(decide(&player, &config, 0), Action::Pass);
    }
}
