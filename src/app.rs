//! Arcade shell
//!
//! Owns the router, the score store and at most one live game session.
//! Navigating replaces the session wholesale: the old snapshot, its high
//! score tracker and anything the host hung off it go away together.

use glam::Vec2;

use crate::highscores::HighScore;
use crate::nav::{Router, Screen, Transition};
use crate::persistence::{SLICER_HIGH_SCORE_KEY, SNAKE_HIGH_SCORE_KEY, ScoreStore};
use crate::settings::Settings;
use crate::sim::grid::{self, Direction, GridConfig, GridEvent, GridState};
use crate::sim::motion::{self, MotionConfig, MotionEvent, MotionState};

/// A running grid game
#[derive(Debug, Clone)]
pub struct GridSession {
    state: GridState,
    high: HighScore,
}

impl GridSession {
    pub fn new(config: GridConfig, store: &dyn ScoreStore, seed: u64) -> Self {
        let high = HighScore::load(store, SNAKE_HIGH_SCORE_KEY);
        let best = u32::try_from(high.best()).unwrap_or(u32::MAX);
        log::info!("Snake game started (seed {})", seed);
        Self {
            state: GridState::new(seed, config, best),
            high,
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high
    }

    /// Current tick interval
    pub fn speed_ms(&self) -> u32 {
        self.state.speed_ms
    }

    pub fn steer(&mut self, direction: Direction) {
        self.state = grid::set_direction(&self.state, direction);
    }

    pub fn toggle_pause(&mut self) {
        self.state = grid::toggle_pause(&self.state);
    }

    pub fn tick(&mut self, now_ms: u64, store: &mut dyn ScoreStore) -> &[GridEvent] {
        self.state = grid::tick(&self.state, now_ms);
        for event in &self.state.events {
            match *event {
                GridEvent::NewHighScore(score) => {
                    self.high.record(score as i64, store);
                }
                GridEvent::GameOver(cause) => {
                    log::info!("Snake over: {:?} (score {})", cause, self.state.score)
                }
                GridEvent::GhostStarted { until_ms } => log::debug!("Ghost until {}", until_ms),
                GridEvent::GhostExpired => log::debug!("Ghost expired"),
                _ => {}
            }
        }
        &self.state.events
    }

    pub fn reset(&mut self) {
        self.state = grid::reset(&self.state);
    }
}

/// A running slicer game
#[derive(Debug, Clone)]
pub struct MotionSession {
    state: MotionState,
    high: HighScore,
}

impl MotionSession {
    pub fn new(config: MotionConfig, store: &dyn ScoreStore, seed: u64) -> Self {
        let high = HighScore::load(store, SLICER_HIGH_SCORE_KEY);
        log::info!("Fruit Ninja started (seed {})", seed);
        Self {
            state: MotionState::new(seed, config, high.best()),
            high,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high
    }

    pub fn step(&mut self, now_ms: f64, store: &mut dyn ScoreStore) -> &[MotionEvent] {
        self.state = motion::step(&self.state, now_ms);
        self.record_events(store);
        &self.state.events
    }

    pub fn pointer(&mut self, point: Vec2, store: &mut dyn ScoreStore) -> &[MotionEvent] {
        self.state = motion::register_pointer_sample(&self.state, point);
        self.record_events(store);
        &self.state.events
    }

    fn record_events(&mut self, store: &mut dyn ScoreStore) {
        for event in &self.state.events {
            match *event {
                MotionEvent::NewHighScore(score) => {
                    self.high.record(score, store);
                }
                MotionEvent::Sliced { kind, points } => log::debug!("Sliced {:?} (+{})", kind, points),
                MotionEvent::GameOver => log::info!("Fruit Ninja over (score {})", self.state.score),
                _ => {}
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = motion::reset(&self.state);
    }
}

/// Whatever the current screen is running
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Home,
    Snake(GridSession),
    FruitNinja(MotionSession),
}

impl Session {
    pub fn screen(&self) -> Screen {
        match self {
            Session::Home => Screen::Home,
            Session::Snake(_) => Screen::Snake,
            Session::FruitNinja(_) => Screen::FruitNinja,
        }
    }
}

/// Router, store and the live session
pub struct Arcade {
    router: Router,
    session: Session,
    store: Box<dyn ScoreStore>,
    settings: Settings,
    next_seed: u64,
}

impl Arcade {
    /// Start on the home screen
    pub fn new(settings: Settings, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self {
            router: Router::default(),
            session: Session::Home,
            store,
            settings,
            next_seed: seed,
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.current()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Switch screens, tearing down the old session and starting a new one
    pub fn navigate(&mut self, screen: Screen) -> Option<Transition> {
        let transition = self.router.navigate_to(screen)?;
        self.session = self.open(screen);
        Some(transition)
    }

    pub fn navigate_path(&mut self, path: &str) -> Option<Transition> {
        self.navigate(Screen::from_path(path))
    }

    /// Leave a game screen for home
    pub fn back(&mut self) -> Option<Transition> {
        self.navigate(Screen::Home)
    }

    /// Reset the current game in place
    pub fn restart(&mut self) {
        match &mut self.session {
            Session::Home => {}
            Session::Snake(game) => game.reset(),
            Session::FruitNinja(game) => game.reset(),
        }
    }

    /// Keyboard input. Returns true if the key meant something here.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Session::Snake(game) = &mut self.session else {
            return false;
        };
        if let Some(direction) = Direction::from_key(key) {
            game.steer(direction);
            return true;
        }
        match key {
            " " => {
                game.toggle_pause();
                true
            }
            "Enter" | "r" | "R" if game.state().is_over() => {
                game.reset();
                true
            }
            _ => false,
        }
    }

    /// Advance the grid game one tick (no-op elsewhere)
    pub fn tick_grid(&mut self, now_ms: f64) -> &[GridEvent] {
        match &mut self.session {
            Session::Snake(game) => game.tick(now_ms.max(0.0) as u64, self.store.as_mut()),
            _ => &[],
        }
    }

    /// Advance the slicer game one fixed step (no-op elsewhere)
    pub fn step_motion(&mut self, now_ms: f64) -> &[MotionEvent] {
        match &mut self.session {
            Session::FruitNinja(game) => game.step(now_ms, self.store.as_mut()),
            _ => &[],
        }
    }

    /// Feed a pointer sample to the slicer game (no-op elsewhere)
    pub fn pointer(&mut self, point: Vec2) -> &[MotionEvent] {
        match &mut self.session {
            Session::FruitNinja(game) => game.pointer(point, self.store.as_mut()),
            _ => &[],
        }
    }

    fn open(&mut self, screen: Screen) -> Session {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        match screen {
            Screen::Home => Session::Home,
            Screen::Snake => Session::Snake(GridSession::new(
                self.settings.grid.clone(),
                self.store.as_ref(),
                seed,
            )),
            Screen::FruitNinja => Session::FruitNinja(MotionSession::new(
                self.settings.motion.clone(),
                self.store.as_ref(),
                seed,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::motion::{Entity, EntityKind};

    fn arcade_with(store: MemoryStore) -> Arcade {
        Arcade::new(Settings::default(), Box::new(store), 7)
    }

    /// Steer the starting snake from (8,8) onto the starting food at (15,10)
    fn eat_first_food(arcade: &mut Arcade) -> Vec<GridEvent> {
        let mut events = Vec::new();
        arcade.tick_grid(0.0);
        arcade.key_down("ArrowDown");
        arcade.tick_grid(0.0);
        arcade.tick_grid(0.0);
        arcade.key_down("ArrowRight");
        for _ in 0..6 {
            events.extend_from_slice(arcade.tick_grid(0.0));
        }
        events
    }

    #[test]
    fn test_starts_home_without_session() {
        let mut arcade = arcade_with(MemoryStore::new());
        assert_eq!(arcade.screen(), Screen::Home);
        assert!(matches!(arcade.session(), Session::Home));
        assert!(arcade.tick_grid(0.0).is_empty());
        assert!(!arcade.key_down("ArrowUp"));
    }

    #[test]
    fn test_navigation_opens_and_tears_down() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate_path("/snake").unwrap();
        assert_eq!(arcade.session().screen(), Screen::Snake);

        arcade.navigate(Screen::FruitNinja).unwrap();
        assert_eq!(arcade.session().screen(), Screen::FruitNinja);

        arcade.back().unwrap();
        assert!(matches!(arcade.session(), Session::Home));
        assert_eq!(arcade.back(), None);
    }

    #[test]
    fn test_unknown_path_goes_home() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate(Screen::Snake);
        arcade.navigate_path("/missing");
        assert_eq!(arcade.screen(), Screen::Home);
        assert!(matches!(arcade.session(), Session::Home));
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate(Screen::Snake);
        let events = eat_first_food(&mut arcade);
        assert!(events.contains(&GridEvent::NewHighScore(1)));
        assert_eq!(arcade.store().get(SNAKE_HIGH_SCORE_KEY), Some(1));
    }

    #[test]
    fn test_stored_high_score_is_loaded() {
        let mut store = MemoryStore::new();
        store.set(SNAKE_HIGH_SCORE_KEY, 5).unwrap();
        let mut arcade = arcade_with(store);
        arcade.navigate(Screen::Snake);
        let Session::Snake(game) = arcade.session() else {
            panic!("expected snake session");
        };
        assert_eq!(game.state().high_score, 5);

        let events = eat_first_food(&mut arcade);
        assert!(!events.iter().any(|e| matches!(e, GridEvent::NewHighScore(_))));
        assert_eq!(arcade.store().get(SNAKE_HIGH_SCORE_KEY), Some(5));
    }

    #[test]
    fn test_pause_and_restart_keys() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate(Screen::Snake);
        assert!(arcade.key_down(" "));
        arcade.tick_grid(0.0);
        let Session::Snake(game) = arcade.session() else {
            panic!("expected snake session");
        };
        assert_eq!(game.state().ticks, 0);

        // Restart only applies once the run is over
        assert!(!arcade.key_down("Enter"));
        assert!(!arcade.key_down("x"));
    }

    #[test]
    fn test_slicer_pointer_scores_and_persists() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate(Screen::FruitNinja);
        let Session::FruitNinja(game) = &mut arcade.session else {
            panic!("expected slicer session");
        };
        let mut state = game.state().clone();
        let id = state.next_entity_id();
        state.entities.push(Entity::new(
            id,
            EntityKind::Watermelon,
            Vec2::new(400.0, 300.0),
            Vec2::ZERO,
        ));
        game.state = state;

        let events = arcade.pointer(Vec2::new(400.0, 300.0)).to_vec();
        assert!(events.contains(&MotionEvent::NewHighScore(5)));
        assert_eq!(arcade.store().get(SLICER_HIGH_SCORE_KEY), Some(5));
    }

    #[test]
    fn test_restart_keeps_screen() {
        let mut arcade = arcade_with(MemoryStore::new());
        arcade.navigate(Screen::FruitNinja);
        for i in 0..5 {
            arcade.step_motion(i as f64 * 16.0);
        }
        arcade.restart();
        let Session::FruitNinja(game) = arcade.session() else {
            panic!("expected slicer session");
        };
        assert_eq!(game.state().steps, 0);
        assert_eq!(game.state().score, 0);
    }
}
