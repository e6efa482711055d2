/// Codon table loading
///
/// The codon table is a tab-delimited file with a header row and one row per
/// A-site codon of each gene. Columns are matched by name, extra columns are
/// ignored.
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::io::tsv_reader;

/// Columns that must be present in the codon table header
pub const CODON_COLUMNS: [&str; 7] = [
    "chrom",
    "asite_start",
    "asite_end",
    "gene_name",
    "codon_idx",
    "gene_strand",
    "codon",
];

/// One codon of a gene, with the genomic range of its A-site
///
/// Fields are kept as read; only `codon_idx` is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodonRecord {
    pub chrom: String,
    pub asite_start: String,
    pub asite_end: String,
    pub gene_name: String,
    /// Offset relative to the gene's reference codon, may be negative
    pub codon_idx: i64,
    pub gene_strand: String,
    pub codon: String,
}

/// Load the codon table from a (possibly gzipped) tab-delimited file
pub fn load_codons<P: AsRef<Path>>(path: P) -> Result<Vec<CodonRecord>> {
    let path = path.as_ref();
    let mut reader = tsv_reader(path)?;

    let headers = reader
        .headers()
        .with_context(|| format!("Cannot read header of {}", path.display()))?;
    let missing: Vec<&str> = CODON_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!(
            "Codon table {} is missing column(s): {}",
            path.display(),
            missing.join(", ")
        );
    }

    let mut codons = Vec::new();
    for record in reader.deserialize() {
        let codon: CodonRecord =
            record.with_context(|| format!("Invalid codon row in {}", path.display()))?;
        codons.push(codon);
    }

    Ok(codons)
}
