use std::path::PathBuf;

use ouro_engine::GENES_LEN;

use crate::{storage::GeneStore, view};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Score of the record to replay (selects `genes/best/{score}` and
    /// `seed/{score}`)
    #[arg(long)]
    score: u32,
    /// Storage root for gene and seed files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let store = GeneStore::new(arg.data_dir.clone());
    let (genes, seed) = store.load_best(arg.score)?;
    anyhow::ensure!(
        genes.len() == GENES_LEN,
        "gene file holds {} genes, expected {GENES_LEN}",
        genes.len()
    );

    let outcome = view::show_episode(&genes, seed)?;
    eprintln!(
        "replayed record {}: score {}, steps {}",
        arg.score, outcome.score, outcome.steps
    );
    Ok(())
}
