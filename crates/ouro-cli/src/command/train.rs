use std::path::PathBuf;

use ouro_engine::{GENES_LEN, SnakeOracle};
use ouro_training::genetic::{GaConfig, GeneticEngine};

use crate::{model::RecordMeta, storage::GeneStore, view};

const PARENT_COUNT: usize = 50;
const CHILD_COUNT: usize = 100;
const MUTATION_RATE: f64 = 0.1;

/// Generations between population checkpoints to `genes/all`.
const SAVE_ALL_INTERVAL: u64 = 20;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Load the starting population from `genes/all` instead of generating
    /// a random one
    #[arg(long)]
    inherit: bool,
    /// Replay the best individual's episode after every generation
    #[arg(long)]
    show: bool,
    /// Storage root for gene and seed files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        inherit,
        show,
        data_dir,
    } = arg;
    let store = GeneStore::new(data_dir.clone());
    let config = GaConfig {
        parent_count: PARENT_COUNT,
        child_count: CHILD_COUNT,
        genes_len: GENES_LEN,
        mutation_rate: MUTATION_RATE,
    };

    let mut rng = rand::rng();
    let mut ga = if *inherit {
        let ancestors = store.load_ancestors(config.parent_count, config.genes_len)?;
        eprintln!("inherited {} ancestors from storage", ancestors.len());
        GeneticEngine::from_ancestors(config, ancestors)
    } else {
        GeneticEngine::random(config, &mut rng)
    };

    let mut oracle = SnakeOracle::new();
    let mut record = 0;
    let mut generation: u64 = 0;
    loop {
        generation += 1;
        ga.evolve(&mut oracle, &mut rng);
        let best = ga
            .best_individual()
            .expect("population was just evaluated")
            .clone();

        eprintln!(
            "generation {generation}: record {record}, best score {} ({} steps), average score {:.3}",
            best.score(),
            best.steps(),
            ga.avg_score()
        );
        if let Some(stats) = ga.fitness_stats() {
            eprintln!(
                "  fitness: min {:.1}, median {:.1}, max {:.1}",
                stats.min, stats.median, stats.max
            );
        }

        if best.score() >= record {
            record = best.score();
            store.save_best(&best)?;
            store.save_record_meta(&RecordMeta::new(&best))?;
            eprintln!("  record {record}: genes and seed saved");
        }

        if *show {
            let seed = best.seed().expect("best individual was just evaluated");
            view::show_episode(best.genes(), seed)?;
        }

        if generation % SAVE_ALL_INTERVAL == 0 {
            let survivors = ga.select_survivors(&mut oracle);
            store.save_all(&survivors)?;
            eprintln!("  checkpoint: saved top {} gene vectors", survivors.len());
        }
    }
}
