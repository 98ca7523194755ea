use std::{
    fmt::Write as _,
    fs,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use ouro_engine::GameSeed;
use ouro_training::genetic::Individual;

use crate::model::RecordMeta;

/// File-backed persistence for gene vectors and episode seeds.
///
/// Layout under the storage root:
///
/// - `genes/all/{i}` — ancestor slots `0..parent_count`, overwritten by each
///   checkpoint; `--inherit` resumes a run from these
/// - `genes/best/{score}` — gene vector of the record holder for `score`
/// - `genes/best/{score}.json` — metadata sidecar for that record
/// - `seed/{score}` — the seed replaying the record episode
///
/// Gene files are a single line of space-separated decimals; seed files hold
/// the seed's hex string verbatim. Records accumulate as scores are broken.
#[derive(Debug, Clone)]
pub struct GeneStore {
    root: PathBuf,
}

impl GeneStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ancestor_path(&self, index: usize) -> PathBuf {
        self.root.join("genes").join("all").join(index.to_string())
    }

    fn best_genes_path(&self, score: u32) -> PathBuf {
        self.root.join("genes").join("best").join(score.to_string())
    }

    fn meta_path(&self, score: u32) -> PathBuf {
        self.root
            .join("genes")
            .join("best")
            .join(format!("{score}.json"))
    }

    fn seed_path(&self, score: u32) -> PathBuf {
        self.root.join("seed").join(score.to_string())
    }

    /// Loads the `count` ancestor gene vectors saved by a previous run.
    ///
    /// Fails on a missing slot file, a malformed float, or a wrong-length
    /// vector; there is no fallback to fresh generation.
    pub fn load_ancestors(&self, count: usize, genes_len: usize) -> anyhow::Result<Vec<Vec<f32>>> {
        (0..count)
            .map(|index| {
                let path = self.ancestor_path(index);
                let genes = read_genes(&path)?;
                anyhow::ensure!(
                    genes.len() == genes_len,
                    "ancestor file {} holds {} genes, expected {genes_len}",
                    path.display(),
                    genes.len()
                );
                Ok(genes)
            })
            .collect()
    }

    /// Persists a record holder's genes and episode seed, keyed by score.
    pub fn save_best(&self, best: &Individual) -> anyhow::Result<()> {
        write_genes(&self.best_genes_path(best.score()), best.genes())?;
        let seed = best
            .seed()
            .context("best individual has no recorded seed")?;
        write_text(&self.seed_path(best.score()), &seed.to_string())?;
        Ok(())
    }

    /// Loads a record holder's genes and seed back for replay.
    pub fn load_best(&self, score: u32) -> anyhow::Result<(Vec<f32>, GameSeed)> {
        let genes = read_genes(&self.best_genes_path(score))?;
        let path = self.seed_path(score);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read seed file: {}", path.display()))?;
        let seed = text
            .trim()
            .parse::<GameSeed>()
            .with_context(|| format!("failed to parse seed file: {}", path.display()))?;
        Ok((genes, seed))
    }

    /// Writes the surviving population to the fixed ancestor slots,
    /// overwriting prior contents.
    pub fn save_all(&self, survivors: &[Individual]) -> anyhow::Result<()> {
        for (index, ind) in survivors.iter().enumerate() {
            write_genes(&self.ancestor_path(index), ind.genes())?;
        }
        Ok(())
    }

    /// Writes the JSON metadata sidecar for a record.
    pub fn save_record_meta(&self, meta: &RecordMeta) -> anyhow::Result<()> {
        let path = self.meta_path(meta.score);
        create_parent(&path)?;
        let file = fs::File::create(&path)
            .with_context(|| format!("failed to create metadata file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), meta)
            .with_context(|| format!("failed to write metadata to {}", path.display()))?;
        Ok(())
    }
}

fn read_genes(path: &Path) -> anyhow::Result<Vec<f32>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read gene file: {}", path.display()))?;
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f32>()
                .with_context(|| format!("malformed gene value {token:?} in {}", path.display()))
        })
        .collect()
}

fn write_genes(path: &Path, genes: &[f32]) -> anyhow::Result<()> {
    let mut line = String::new();
    for gene in genes {
        write!(&mut line, "{gene} ").unwrap();
    }
    write_text(path, &line)
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use ouro_engine::{EpisodeOracle, EpisodeOutcome};

    use super::*;

    struct TempStore {
        store: GeneStore,
        root: PathBuf,
    }

    impl TempStore {
        fn new(tag: &str) -> Self {
            static COUNTER: AtomicU32 = AtomicU32::new(0);
            let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
            let root = std::env::temp_dir().join(format!(
                "ouro-store-{tag}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&root).unwrap();
            Self {
                store: GeneStore::new(root.clone()),
                root,
            }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    struct FixedOracle {
        score: u32,
        steps: u32,
        seed: GameSeed,
    }

    impl EpisodeOracle for FixedOracle {
        fn run_episode(&mut self, _genes: &[f32]) -> EpisodeOutcome {
            EpisodeOutcome {
                score: self.score,
                steps: self.steps,
                seed: self.seed,
            }
        }
    }

    fn seed(n: u128) -> GameSeed {
        format!("{n:032x}").parse().unwrap()
    }

    #[test]
    fn test_ancestor_roundtrip() {
        let temp = TempStore::new("ancestors");
        let a = Individual::new(vec![0.5, -0.25, 1.0]);
        let b = Individual::new(vec![-1.0, 0.0, 0.125]);
        temp.store.save_all(&[a.clone(), b.clone()]).unwrap();

        let loaded = temp.store.load_ancestors(2, 3).unwrap();
        assert_eq!(loaded, vec![a.genes().to_vec(), b.genes().to_vec()]);
    }

    #[test]
    fn test_missing_ancestor_is_an_error() {
        let temp = TempStore::new("missing");
        assert!(temp.store.load_ancestors(1, 3).is_err());
    }

    #[test]
    fn test_wrong_gene_count_is_an_error() {
        let temp = TempStore::new("short");
        temp.store
            .save_all(&[Individual::new(vec![1.0, 2.0])])
            .unwrap();
        let err = temp.store.load_ancestors(1, 3).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_malformed_gene_text_is_an_error() {
        let temp = TempStore::new("malformed");
        let path = temp.store.ancestor_path(0);
        write_text(&path, "0.5 not-a-float 1.0").unwrap();
        assert!(temp.store.load_ancestors(1, 3).is_err());
    }

    #[test]
    fn test_best_roundtrip() {
        let temp = TempStore::new("best");
        let mut best = Individual::new(vec![0.75, -0.5]);
        best.evaluate(&mut FixedOracle {
            score: 12,
            steps: 340,
            seed: seed(0xabcd),
        });
        temp.store.save_best(&best).unwrap();

        let (genes, loaded_seed) = temp.store.load_best(12).unwrap();
        assert_eq!(genes, best.genes());
        assert_eq!(loaded_seed, seed(0xabcd));
    }

    #[test]
    fn test_trailing_space_is_tolerated() {
        let temp = TempStore::new("trailing");
        write_text(&temp.store.ancestor_path(0), "1.0 2.0 3.0 ").unwrap();
        let loaded = temp.store.load_ancestors(1, 3).unwrap();
        assert_eq!(loaded[0], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_record_meta_is_written() {
        let temp = TempStore::new("meta");
        let mut best = Individual::new(vec![0.0]);
        best.evaluate(&mut FixedOracle {
            score: 3,
            steps: 50,
            seed: seed(9),
        });
        temp.store.save_record_meta(&RecordMeta::new(&best)).unwrap();

        let text = fs::read_to_string(temp.store.meta_path(3)).unwrap();
        let meta: RecordMeta = serde_json::from_str(&text).unwrap();
        assert_eq!(meta.score, 3);
        assert_eq!(meta.steps, 50);
        assert_eq!(meta.seed, seed(9));
    }
}
