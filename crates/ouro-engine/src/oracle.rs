use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::{
    game::SnakeGame,
    net::FeedForwardNet,
    seed::GameSeed,
};

/// Outcome of one evaluated game episode.
///
/// `steps` is always at least 1: the game counts a step before resolving any
/// collision, and the fitness formula divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    /// Food eaten during the episode.
    pub score: u32,
    /// Total steps taken before the episode ended.
    pub steps: u32,
    /// The seed that replays this exact episode.
    pub seed: GameSeed,
}

/// The fitness-oracle contract consumed by the genetic algorithm.
///
/// Each call simulates one complete episode for the given gene vector.
/// Implementations are free to draw a fresh seed per call; the seed actually
/// used is reported back in the outcome so the episode can be replayed.
pub trait EpisodeOracle {
    fn run_episode(&mut self, genes: &[f32]) -> EpisodeOutcome;
}

/// The real oracle: plays snake with a fresh random seed per episode.
#[derive(Debug)]
pub struct SnakeOracle {
    rng: StdRng,
}

impl SnakeOracle {
    /// Creates an oracle seeded from the OS random source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for SnakeOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeOracle for SnakeOracle {
    fn run_episode(&mut self, genes: &[f32]) -> EpisodeOutcome {
        play_episode(genes, self.rng.random())
    }
}

/// Plays one full episode deterministically for the given genes and seed.
///
/// # Panics
///
/// Panics if `genes` has the wrong length (see
/// [`FeedForwardNet::from_genes`]).
#[must_use]
pub fn play_episode(genes: &[f32], seed: GameSeed) -> EpisodeOutcome {
    let net = FeedForwardNet::from_genes(genes);
    let mut game = SnakeGame::with_seed(seed);
    while game.state().is_running() {
        let turn = net.decide(&game.sense());
        game.step(turn);
    }
    EpisodeOutcome {
        score: game.score(),
        steps: game.steps(),
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::GENES_LEN;

    fn seed(n: u128) -> GameSeed {
        format!("{n:032x}").parse().unwrap()
    }

    #[test]
    fn test_episode_terminates_with_positive_steps() {
        // All-zero genes always turn left; the episode must still end,
        // either by collision or by the hunger limit.
        let outcome = play_episode(&[0.0; GENES_LEN], seed(1));
        assert!(outcome.steps >= 1);
    }

    #[test]
    fn test_same_genes_and_seed_reproduce_episode() {
        let mut rng = StdRng::from_os_rng();
        let genes: Vec<f32> = (0..GENES_LEN).map(|_| rng.random_range(-1.0..=1.0)).collect();
        let s = seed(0xfeed);
        assert_eq!(play_episode(&genes, s), play_episode(&genes, s));
    }

    #[test]
    fn test_oracle_reports_the_seed_it_used() {
        let mut oracle = SnakeOracle::new();
        let genes = vec![0.0; GENES_LEN];
        let outcome = oracle.run_episode(&genes);
        let replayed = play_episode(&genes, outcome.seed);
        assert_eq!(outcome, replayed);
    }
}
