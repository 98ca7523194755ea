//! The population, the individual, and the generational cycle.
//!
//! # Selection operators
//!
//! Two selection operators drive the cycle:
//!
//! - **Elitism**: deterministic top-k by fitness. Cuts the combined
//!   parent+child population back down to `parent_count` and yields the
//!   per-generation best individual.
//! - **Roulette wheel**: fitness-proportional sampling *with replacement*
//!   over the culled parents. The probability of drawing an individual is
//!   its fitness over the population's fitness sum; a parent may be drawn
//!   twice in one pairing (crossover then runs on two copies of the same
//!   genes).
//!
//! The roulette wheel is well-defined because fitness is strictly positive
//! after evaluation: `steps ≥ 1` and `score ≥ 0` give
//! `fitness ≥ 100 000 / steps > 0`.
//!
//! # Ownership
//!
//! Selection returns owned clones, and the best-of-generation snapshot is an
//! owned copy as well: holders of a previous generation's best individual
//! keep an immutable snapshot even after the engine discards that
//! individual.

use ouro_engine::{EpisodeOracle, GameSeed};
use ouro_stats::descriptive::DescriptiveStats;
use rand::{Rng, seq::SliceRandom as _};

use crate::genes;

const FITNESS_SCALE: f64 = 100_000.0;

/// A single candidate solution: a gene vector plus its evaluated outcome.
#[derive(Debug, Clone)]
pub struct Individual {
    genes: Vec<f32>,
    score: u32,
    steps: u32,
    fitness: f64,
    seed: Option<GameSeed>,
}

impl Individual {
    /// Wraps a gene vector as an unevaluated individual.
    ///
    /// Fitness is 0 and the seed is `None` until [`Self::evaluate`] runs;
    /// unevaluated individuals must not be ranked.
    #[must_use]
    pub fn new(genes: Vec<f32>) -> Self {
        Self {
            genes,
            score: 0,
            steps: 0,
            fitness: 0.0,
            seed: None,
        }
    }

    /// Plays one episode through the oracle and derives fitness.
    ///
    /// Stores the episode's score, steps, and seed, then computes
    /// `fitness = (score + 1/steps) × 100 000`. Called exactly once per
    /// generation per individual; each call may consume a fresh seed, so
    /// repeated evaluation of the same genes can differ.
    ///
    /// # Panics
    ///
    /// Panics if the oracle reports a zero-length episode, which violates
    /// its contract.
    pub fn evaluate<O>(&mut self, oracle: &mut O)
    where
        O: EpisodeOracle + ?Sized,
    {
        let outcome = oracle.run_episode(&self.genes);
        assert!(outcome.steps > 0, "oracle returned a zero-length episode");
        self.score = outcome.score;
        self.steps = outcome.steps;
        self.seed = Some(outcome.seed);
        self.fitness =
            (f64::from(outcome.score) + 1.0 / f64::from(outcome.steps)) * FITNESS_SCALE;
    }

    #[must_use]
    pub fn genes(&self) -> &[f32] {
        &self.genes
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The seed of the episode behind `score`/`steps`, kept for exact
    /// replay. `None` until the individual has been evaluated.
    #[must_use]
    pub fn seed(&self) -> Option<GameSeed> {
        self.seed
    }
}

/// Parameters of the genetic algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GaConfig {
    /// Population size after selection (and at initialization).
    pub parent_count: usize,
    /// Children bred per generation. Must be even: reproduction always
    /// yields children in pairs.
    pub child_count: usize,
    /// Length of every gene vector.
    pub genes_len: usize,
    /// Per-gene mutation probability, in `[0, 1]`.
    pub mutation_rate: f64,
}

impl GaConfig {
    fn validate(&self) {
        assert!(self.parent_count > 0, "parent_count must be positive");
        assert!(
            self.child_count % 2 == 0,
            "child_count must be even: reproduction yields children in pairs"
        );
        assert!(self.genes_len > 0, "genes_len must be positive");
        assert!(
            (0.0..=1.0).contains(&self.mutation_rate),
            "mutation_rate must be in [0, 1]"
        );
    }
}

/// Owns the population and performs one generation per [`Self::evolve`]
/// call.
///
/// Evaluation is strictly sequential in population order; the engine has no
/// shared state, so independent runs are independent engine instances.
#[derive(Debug)]
pub struct GeneticEngine {
    config: GaConfig,
    population: Vec<Individual>,
    best: Option<Individual>,
    avg_score: f64,
}

impl GeneticEngine {
    /// Creates an engine with `parent_count` random ancestors
    /// (gene components i.i.d. uniform in `[-1, 1]`).
    #[must_use]
    pub fn random<R>(config: GaConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        config.validate();
        let population = (0..config.parent_count)
            .map(|_| Individual::new(genes::random(rng, config.genes_len)))
            .collect();
        Self {
            config,
            population,
            best: None,
            avg_score: 0.0,
        }
    }

    /// Creates an engine from previously persisted ancestor gene vectors.
    ///
    /// # Panics
    ///
    /// Panics unless exactly `parent_count` vectors of length `genes_len`
    /// are supplied.
    #[must_use]
    pub fn from_ancestors(config: GaConfig, ancestors: Vec<Vec<f32>>) -> Self {
        config.validate();
        assert_eq!(
            ancestors.len(),
            config.parent_count,
            "expected {} ancestor gene vectors",
            config.parent_count
        );
        for genes in &ancestors {
            assert_eq!(genes.len(), config.genes_len, "ancestor gene length mismatch");
        }
        let population = ancestors.into_iter().map(Individual::new).collect();
        Self {
            config,
            population,
            best: None,
            avg_score: 0.0,
        }
    }

    /// Runs one generation: evaluate, select parents, breed, replace.
    ///
    /// On return the population holds `parent_count + child_count`
    /// individuals (children still unevaluated), [`Self::best_individual`]
    /// is the highest-fitness individual of the generation just evaluated,
    /// and [`Self::avg_score`] is the mean score over the pre-selection
    /// population.
    #[expect(clippy::cast_precision_loss)]
    pub fn evolve<O, R>(&mut self, oracle: &mut O, rng: &mut R)
    where
        O: EpisodeOracle + ?Sized,
        R: Rng + ?Sized,
    {
        // Evaluation phase.
        let mut score_sum: u64 = 0;
        for ind in &mut self.population {
            ind.evaluate(oracle);
            score_sum += u64::from(ind.score);
        }
        self.avg_score = score_sum as f64 / self.population.len() as f64;

        // Parent selection phase. The shuffle breaks the fitness-sorted
        // order so later roulette draws carry no position artifacts.
        self.population = self.elitism_selection(self.config.parent_count);
        self.best = self.population.first().cloned();
        self.population.shuffle(rng);

        // Reproduction phase: two roulette parents, two gene copies, one
        // crossover, independent mutation of each child.
        let mut children = Vec::with_capacity(self.config.child_count);
        while children.len() < self.config.child_count {
            let p1 = roulette_wheel_select(&self.population, rng);
            let p2 = roulette_wheel_select(&self.population, rng);
            let mut c1 = p1.genes.clone();
            let mut c2 = p2.genes.clone();
            genes::crossover(&mut c1, &mut c2, rng);
            genes::mutate(&mut c1, self.config.mutation_rate, rng);
            genes::mutate(&mut c2, self.config.mutation_rate, rng);
            children.push(Individual::new(c1));
            children.push(Individual::new(c2));
        }

        // Replacement phase.
        children.shuffle(rng);
        self.population.extend(children);
    }

    /// Returns owned clones of the top `k` individuals by descending
    /// fitness. Ties break arbitrarily.
    ///
    /// # Panics
    ///
    /// Panics if `k` exceeds the population size.
    #[must_use]
    pub fn elitism_selection(&self, k: usize) -> Vec<Individual> {
        assert!(k <= self.population.len());
        let mut ranked = self.population.clone();
        ranked.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
        ranked.truncate(k);
        ranked
    }

    /// Re-evaluates the whole population and returns the top
    /// `parent_count` clones — the checkpointing path behind `save all`.
    pub fn select_survivors<O>(&mut self, oracle: &mut O) -> Vec<Individual>
    where
        O: EpisodeOracle + ?Sized,
    {
        for ind in &mut self.population {
            ind.evaluate(oracle);
        }
        self.elitism_selection(self.config.parent_count)
    }

    #[must_use]
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    #[must_use]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual of the last evolved generation, as an owned
    /// snapshot. `None` before the first [`Self::evolve`] call.
    #[must_use]
    pub fn best_individual(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Mean score over the population evaluated by the last
    /// [`Self::evolve`] call.
    #[must_use]
    pub fn avg_score(&self) -> f64 {
        self.avg_score
    }

    /// Fitness distribution of the current population.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.population.iter().map(Individual::fitness))
    }

    /// Score distribution of the current population.
    #[must_use]
    pub fn score_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.population.iter().map(|ind| f64::from(ind.score)))
    }
}

/// Draws one individual with probability proportional to its fitness.
///
/// Accumulates fitness in population order until the running sum exceeds a
/// uniform pick in `[0, wheel)`. Repeated draws are independent, so the same
/// individual may be returned more than once. If floating-point rounding
/// lets the pick slip past every boundary, the last individual wins.
fn roulette_wheel_select<'a, R>(population: &'a [Individual], rng: &mut R) -> &'a Individual
where
    R: Rng + ?Sized,
{
    let wheel: f64 = population.iter().map(|ind| ind.fitness).sum();
    let pick = rng.random_range(0.0..wheel);
    let mut current = 0.0;
    for ind in population {
        current += ind.fitness;
        if current > pick {
            return ind;
        }
    }
    population.last().expect("population must not be empty")
}
