//! Big Two game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod player;
pub mod rng;
pub mod rules;
pub mod state;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use player::*;
pub use rng::*;
pub use rules::*;
pub use state::*;
