//! solotro: a four-seat wildcard card game engine
//!
//! Each player holds eight cards drawn with replacement from a 54-card space (52 cards and two
//! coloured jokers). Once per round the human may discard up to two cards, then plays five
//! cards against a poker-like category table; the three CPU seats always play their best five
//! of eight. Every fourth round the human pays a rank-based penalty.
//!
//! Modules:
//! - [`cards`] and [`deck`]: card values, identities and the joker-capped sampler
//! - [`evaluator`]: category scoring, joker resolution and best-five-of-eight search
//! - [`advisor`]: Monte-Carlo discard suggestions under a time budget
//! - [`game`]: the round state machine
//! - [`persistence`]: JSON save files
//! - [`tui`]: the terminal front-end
//!
//! ## Quick start: score a hand with a joker
//! ```
//! use solotro::cards::parse_faces;
//! use solotro::deck::Sampler;
//! use solotro::evaluator::{best_hand, Category};
//!
//! let mut sampler = Sampler::seeded(7);
//! let hand: Vec<_> = parse_faces("Ah 2h 3h 4h RJ 9c 9d Ks")
//!     .unwrap()
//!     .into_iter()
//!     .map(|face| sampler.issue(face))
//!     .collect();
//!
//! let best = best_hand(&hand).unwrap();
//! assert_eq!(best.result().category, Category::StraightFlush);
//! assert_eq!(best.score(), 150);
//! assert_eq!(best.result().formula, "(15) × 10");
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin solotro
//! ```

pub mod advisor;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod persistence;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
