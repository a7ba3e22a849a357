//! # Lawnmower
//!
//! A grid-world simulation of a robotic lawnmower, used as a training
//! environment for sequential decision making agents.
//!
//! The world is a rectangular grid surrounded by a one-cell obstacle border.
//! The mower drives forward or turns in place; every grass cell it enters is
//! mowed. Episodes end when the whole lawn is mowed, when the mower hits an
//! obstacle, or when the step budget is exhausted.
//!
//! ```
//! use lawnmower::{Action, Env, GridWorld};
//!
//! let mut world = GridWorld::new(5, 5, 2, 50).unwrap();
//! let obs = world.reset();
//! assert_eq!(obs.shape(), (5, 5));
//! let t = world.step_action(Action::TurnLeft).unwrap();
//! assert!(!t.done);
//! assert_eq!(world.action_size(), 3);
//! ```
#![deny(clippy::all, clippy::pedantic)]

pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod types;
pub mod world;

pub use config::{Config, Rewards, TURN_LIMIT};
pub use env::{DoneReason, Env, Info, Transition};
pub use error::{LawnError, Result};
pub use grid::{Grid, Observation};
pub use types::{Action, Cell, Direction, MowerState, Position, ACTION_SPACE_SIZE};
pub use world::GridWorld;
