/// Run configuration and the merge pipeline
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::codon::load_codons;
use crate::expression::load_expression;
use crate::io::{ensure_output_dir, output_path};
use crate::logging::{EXECUTE, STATUS};
use crate::merge::merge_tables;
use crate::output::{write_merged, MISSING_VALUE};
use crate::pair_prob::{load_pair_probs, FIRST_CODON_IDX};

/// Everything needed for one merge run
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Codon table (`-f`)
    pub codons: PathBuf,
    /// Pairing-probability arrays (`-s`)
    pub pair_probs: PathBuf,
    /// Salmon or Kallisto expression table (`-t`)
    pub expression: PathBuf,
    /// Directory receiving `<codon basename>.bed` (`-o`)
    pub output_dir: PathBuf,
    /// Codon index of the first probability on each line
    pub first_codon_idx: i64,
    /// Written in place of absent pairing probabilities
    pub missing_value: String,
}

impl MergeConfig {
    pub fn new(
        codons: impl Into<PathBuf>,
        pair_probs: impl Into<PathBuf>,
        expression: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            codons: codons.into(),
            pair_probs: pair_probs.into(),
            expression: expression.into(),
            output_dir: output_dir.into(),
            first_codon_idx: FIRST_CODON_IDX,
            missing_value: MISSING_VALUE.to_string(),
        }
    }

    pub fn with_first_codon_idx(mut self, first_codon_idx: i64) -> Self {
        self.first_codon_idx = first_codon_idx;
        self
    }

    pub fn with_missing_value(mut self, missing_value: impl Into<String>) -> Self {
        self.missing_value = missing_value.into();
        self
    }

    /// Where the merged table will be written
    pub fn output_path(&self) -> PathBuf {
        output_path(&self.output_dir, &self.codons)
    }
}

/// Load the three inputs, join them and write the merged table.
///
/// The output directory is created first; the table itself is only written
/// once every stage has succeeded. Returns the path of the written table.
pub fn run(config: &MergeConfig) -> Result<PathBuf> {
    info!(target: STATUS, "Reading the input file: {}", config.codons.display());
    ensure_output_dir(&config.output_dir)?;

    info!(target: EXECUTE, "Starting the pre-processing module");
    let codons = load_codons(&config.codons)?;

    info!(target: EXECUTE, "Transforming the dataframe of RNA 2' structure pairing probabilities");
    let pair_probs = load_pair_probs(&config.pair_probs, config.first_codon_idx)?;

    info!(target: EXECUTE, "Loading tpm");
    let (_schema, expression) = load_expression(&config.expression)?;

    info!(target: EXECUTE, "Merging all the df together");
    let (merged, summary) = merge_tables(&codons, &expression, &pair_probs);
    log::debug!("{summary:?}");
    if summary.dropped_codons > 0 {
        log::warn!(
            "{} of {} codons dropped: gene missing from {}",
            summary.dropped_codons,
            summary.codons,
            display_name(&config.expression)
        );
    }

    let path = config.output_path();
    write_merged(&path, &merged, &config.missing_value)?;
    info!(
        target: STATUS,
        "Wrote {} rows ({} without pairing probability) to {}",
        summary.merged_rows,
        summary.missing_pair_prob,
        path.display()
    );

    info!(target: STATUS, "Data merging module finished.");
    Ok(path)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
