//! Screen routing
//!
//! Three screens addressed by path. Anything unrecognised lands on the home
//! screen, the same as an explicit redirect.

use serde::{Deserialize, Serialize};

/// A routable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Home,
    Snake,
    FruitNinja,
}

impl Screen {
    pub fn path(self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Snake => "/snake",
            Screen::FruitNinja => "/fruit-ninja",
        }
    }

    /// Resolve a path (or `#/path` hash fragment); unknown routes go home
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        match path {
            "/snake" | "snake" => Screen::Snake,
            "/fruit-ninja" | "fruit-ninja" => Screen::FruitNinja,
            _ => Screen::Home,
        }
    }

    pub fn is_game(self) -> bool {
        self != Screen::Home
    }
}

/// An entry on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub id: &'static str,
    pub screen: Screen,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Games listed on the home screen, in display order
pub const GAMES: [GameInfo; 2] = [
    GameInfo {
        id: "snake",
        screen: Screen::Snake,
        title: "Snake Game",
        description: "Classic snake game with modern twists",
        icon: "🐍",
    },
    GameInfo {
        id: "fruit-ninja",
        screen: Screen::FruitNinja,
        title: "Fruit Ninja",
        description: "Slice fruits with precision",
        icon: "🍎",
    },
];

/// A change of screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

/// Current-route holder
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Screen,
}

impl Router {
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Go to `screen`. Returns the transition, or `None` if already there.
    pub fn navigate_to(&mut self, screen: Screen) -> Option<Transition> {
        if screen == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: screen,
        };
        self.current = screen;
        log::info!("Navigate {} -> {}", transition.from.path(), transition.to.path());
        Some(transition)
    }

    /// Go to whatever `path` resolves to
    pub fn navigate_path(&mut self, path: &str) -> Option<Transition> {
        self.navigate_to(Screen::from_path(path))
    }
}
