//! Genetic-algorithm core for evolving the snake controller's weights.
//!
//! This crate owns the population and the generational cycle; the game and
//! the network forward pass live behind the
//! [`EpisodeOracle`](ouro_engine::EpisodeOracle) contract in `ouro-engine`.
//!
//! # One generation
//!
//! ```text
//! evaluate every individual (oracle, sequential)
//!     ↓
//! elitism: cull to parent_count, snapshot the best
//!     ↓
//! roulette-wheel parents → copy genes → single-point crossover
//!     ↓
//! Gaussian mutation per child
//!     ↓
//! append children: population is parent_count + child_count again
//! ```
//!
//! # Fitness
//!
//! `fitness = (score + 1/steps) × 100 000`. The score dominates; the
//! `1/steps` term only breaks ties between equal scores in favor of shorter
//! (more efficient) episodes and can never outweigh a single point of score.
//!
//! # Randomness and reproducibility
//!
//! Every operator takes an explicit `R: Rng + ?Sized`, so unit tests run on
//! seeded generators and independent engines never share state. Note a
//! deliberate limitation: only the *oracle's* episode seed is recorded for
//! replay. The engine's own draws (ancestor generation, crossover points,
//! mutation masks, shuffles) are not, so a saved record replays the best
//! episode but not the evolutionary history that produced its genes.

pub mod genes;
pub mod genetic;
