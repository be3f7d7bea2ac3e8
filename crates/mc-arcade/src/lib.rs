//! # mc-arcade: Mind Circus mini-game arcade
//!
//! Three independent mini-games, each a small state machine, plus the
//! session that switches between them and keeps score.
//!
//! ## Games
//!
//! - **Reflex**: wait for the cue after a random delay, then tap
//! - **Recall**: memorize a symbol line-up, name the one that vanished
//! - **Puzzle**: multiple-choice riddles with an insight on success
//!
//! ## Architecture
//!
//! ```text
//! Arcade
//!     │
//!     ├── StageSelector (which stage is mounted)
//!     ├── Controller ── Reflex | Recall | Puzzle (owns its OneShotTimer)
//!     ├── StatsAggregator (only writer of StageStats)
//!     └── SessionJournal
//!           │
//!           v
//!     RoundOutcome → StageStats → ArcadeView
//! ```
//!
//! All timestamps are milliseconds supplied by the caller. Timers are
//! deadlines fired by [`Arcade::tick`]; nothing runs in the background.

pub mod arcade;
pub mod autoplay;
pub mod config;
pub mod content;
pub mod games;
pub mod timing;
pub mod view;

pub use arcade::*;
pub use autoplay::*;
pub use config::*;
pub use content::*;
pub use games::*;
pub use timing::*;
pub use view::*;
