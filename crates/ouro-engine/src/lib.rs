//! Snake game engine and episode oracle for the Ouro trainer.
//!
//! This crate is the fitness side of the training system: it simulates one
//! game of snake per episode, driven by a fixed-topology feed-forward network
//! whose weights come from a flat gene vector. The genetic algorithm in
//! `ouro-training` never looks inside the simulation; it only sees the
//! [`EpisodeOracle`] contract:
//!
//! ```text
//! gene vector
//!     ↓ run_episode
//! EpisodeOutcome { score, steps, seed }
//! ```
//!
//! # Determinism
//!
//! All in-episode randomness (food placement) derives from a [`GameSeed`]
//! that seeds a per-episode PCG generator. Replaying [`play_episode`] with
//! the same genes and seed reproduces the episode exactly, which is how
//! record-breaking runs are shown again later.
//!
//! # Modules
//!
//! - [`game`]: grid, snake movement rules, and the sensor vector
//! - [`net`]: the `[11, 16, 3]` controller network and its gene layout
//! - [`oracle`]: episode execution and the oracle contract
//! - [`seed`]: the opaque, replayable episode seed

pub use self::{game::*, net::*, oracle::*, seed::*};

pub mod game;
pub mod net;
pub mod oracle;
pub mod seed;
