//! Routes and the game list shown on the hub page

/// Hub pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    RunAway,
    FlyToTheSky,
    GoHigh,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::List, Route::RunAway, Route::FlyToTheSky, Route::GoHigh];

    pub fn path(self) -> &'static str {
        match self {
            Route::List => "/games",
            Route::RunAway => "/games/run-away",
            Route::FlyToTheSky => "/games/fly-to-the-sky",
            Route::GoHigh => "/games/go-high",
        }
    }

    /// Match a location pathname; a trailing slash is ignored
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    /// Whether the route hosts a game canvas
    pub fn is_game(self) -> bool {
        !matches!(self, Route::List)
    }
}

/// A card on the game list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameCard {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    /// Closed cards are teasers and do not link anywhere
    pub is_open: bool,
}

impl GameCard {
    /// Route the card opens, if it is playable
    pub fn route(&self) -> Option<Route> {
        if self.is_open { Route::from_path(self.href) } else { None }
    }
}

pub const GAMES: [GameCard; 8] = [
    GameCard {
        title: "Endless Jump",
        description: "Run and Jump through a beautiful cityscape, avoiding obstacles..",
        href: "/games/run-away",
        is_open: true,
    },
    GameCard {
        title: "Fly To The Sky",
        description: "Steer your plane through the pillars and grab items to stay airborne.",
        href: "/games/fly-to-the-sky",
        is_open: true,
    },
    GameCard {
        title: "Go High",
        description: "Dodge falling asteroids and climb as high as your ship can take you.",
        href: "/games/go-high",
        is_open: true,
    },
    GameCard {
        title: "CRYPTO PUZZLE",
        description: "Solve complex puzzles to hack into the mainframe and steal valuable data.",
        href: "/games/crypto-puzzle",
        is_open: false,
    },
    GameCard {
        title: "SYNTH SHOOTER",
        description: "Fast-paced shooter with synthwave aesthetics. Survive waves of enemies.",
        href: "/games/synth-shooter",
        is_open: false,
    },
    GameCard {
        title: "MEMORY MATRIX",
        description: "Test your memory skills in this futuristic pattern matching game.",
        href: "/games/memory-matrix",
        is_open: false,
    },
    GameCard {
        title: "HOLO CHESS",
        description: "Strategic holographic chess with special abilities and power moves.",
        href: "/games/holo-chess",
        is_open: false,
    },
    GameCard {
        title: "BYTE BRAWLER",
        description: "Fight in the digital arena against AI opponents with unique fighting styles.",
        href: "/games/byte-brawler",
        is_open: false,
    },
];
