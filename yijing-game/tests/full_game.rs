use yijing_game::{
    Action, ActionError, BundledLoader, CardCatalog, ConfigProvider, GameConfig, GameEngine,
    GameSession, GameStorage, SessionState, bot,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

const STEP_LIMIT: usize = 10_000;

fn play_out(session: &mut GameSession) -> usize {
    let mut steps = 0;
    while !session.is_over() && steps < STEP_LIMIT {
        let action = bot::choose(&session.menu());
        session.perform(action).unwrap();
        steps += 1;
    }
    steps
}

fn new_session(seed: u64) -> GameSession {
    let config = GameConfig::from_provider(&ConfigProvider::bundled());
    GameSession::new(seed, ["Fuxi", "Wen", "Zhou"], config, CardCatalog::bundled()).unwrap()
}

#[test]
fn bot_games_terminate() {
    for seed in [1, 7, 42, 1337] {
        let mut session = new_session(seed);
        let steps = play_out(&mut session);
        assert!(steps < STEP_LIMIT, "seed {seed} did not finish");
        assert!(session.is_over());
        assert!(session.turn() <= session.config().turn.max_turns + 1);
        assert_eq!(session.perform(Action::Pass), Err(ActionError::GameOver));
        assert_eq!(&session.victories(), session.winners());
    }
}

#[test]
fn seeds_reproduce_whole_games() {
    let mut first = new_session(2024);
    let mut second = new_session(2024);
    play_out(&mut first);
    play_out(&mut second);
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn every_counter_respects_caps_after_play() {
    let mut session = new_session(99);
    play_out(&mut session);
    let caps = session.config().caps;
    for player in session.players() {
        let r = &player.resources;
        assert!(r.qi <= caps.qi);
        assert!(r.merit <= caps.merit);
        assert!(r.sincerity <= caps.sincerity);
        assert!(r.yin <= caps.yin && r.yang <= caps.yang);
        assert!(r.affinities.iter().all(|(_, value)| value <= caps.affinity));
        assert!(player.hand.len() <= caps.hand_size);
    }
}

#[derive(Default)]
struct MemoryStorage {
    saves: RefCell<HashMap<String, SessionState>>,
}

impl GameStorage for MemoryStorage {
    type Error = Infallible;

    fn save_game(&self, save_name: &str, state: &SessionState) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(save_name.to_string(), state.clone());
        Ok(())
    }

    fn load_game(&self, save_name: &str) -> Result<Option<SessionState>, Self::Error> {
        Ok(self.saves.borrow().get(save_name).cloned())
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        self.saves.borrow_mut().remove(save_name);
        Ok(())
    }
}

#[test]
fn saved_games_continue_like_uninterrupted_ones() {
    let engine = GameEngine::new(BundledLoader, MemoryStorage::default());
    let mut session = engine.create_session(5, ["Fuxi", "Wen"]).unwrap();
    for _ in 0..6 {
        let action = bot::choose(&session.menu());
        session.perform(action).unwrap();
    }
    engine.save_game("midgame", &session).unwrap();
    let mut resumed = engine.load_game("midgame").unwrap().unwrap();

    play_out(&mut session);
    play_out(&mut resumed);
    assert_eq!(session.snapshot(), resumed.snapshot());
}
