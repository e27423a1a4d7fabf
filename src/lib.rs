#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod attack;
mod board;
mod cellset;
mod common;
mod config;
mod game;
pub mod placement;
mod player;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod player_cli;

pub use attack::*;
pub use board::*;
pub use cellset::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use placement::Direction;
pub use player::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player_cli::*;
