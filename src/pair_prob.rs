/// Pairing-probability reshaping
///
/// Input lines look like `gene_name<TAB>p1 p2 p3 ...`, one line per gene, with
/// one probability per codon. Values are assumed to be listed in increasing
/// codon order without gaps, so the codon index is derived from the position
/// of each value on its line.
use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::io::open_input;

/// Codon index assigned to the first probability of each gene
pub const FIRST_CODON_IDX: i64 = -8;

/// Codon index increment between consecutive probabilities
pub const CODON_IDX_STEP: i64 = 1;

/// Pairing probability of one codon
#[derive(Debug, Clone, PartialEq)]
pub struct PairProbRecord {
    pub gene_name: String,
    pub codon_idx: i64,
    pub pair_prob: f64,
}

/// Expand one input line into per-codon records
///
/// Only the second tab-separated field holds probabilities; later fields are
/// ignored. Empty tokens (repeated, leading or trailing whitespace) are
/// skipped, as are blank lines. A non-blank line without a tab is rejected.
pub fn reshape_line(line: &str, first_idx: i64) -> Result<Vec<PairProbRecord>> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = line.split('\t');
    let gene_name = fields.next().unwrap_or_default();
    let Some(probs) = fields.next() else {
        bail!("Expected <gene>\\t<probabilities>, found no tab");
    };

    probs
        .split_ascii_whitespace()
        .enumerate()
        .map(|(i, token)| {
            let pair_prob: f64 = token
                .parse()
                .with_context(|| format!("Invalid probability '{token}' for {gene_name}"))?;
            Ok(PairProbRecord {
                gene_name: gene_name.to_string(),
                codon_idx: codon_idx_at(first_idx, i)?,
                pair_prob,
            })
        })
        .collect()
}

/// Codon index of the `i`-th value on a line
fn codon_idx_at(first_idx: i64, i: usize) -> Result<i64> {
    i64::try_from(i)
        .ok()
        .and_then(|i| i.checked_mul(CODON_IDX_STEP))
        .and_then(|offset| first_idx.checked_add(offset))
        .with_context(|| {
            format!("Codon index overflows starting from {first_idx} at value {}", i + 1)
        })
}

/// Read a pairing-probability file into one record per codon, in file order
pub fn load_pair_probs<P: AsRef<Path>>(path: P, first_idx: i64) -> Result<Vec<PairProbRecord>> {
    let path = path.as_ref();
    let input = open_input(path)?;

    let mut records = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read {}", path.display()))?;
        let reshaped = reshape_line(&line, first_idx)
            .with_context(|| format!("{}:{}", path.display(), line_no + 1))?;
        records.extend(reshaped);
    }

    Ok(records)
}
