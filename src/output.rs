/// Writing the merged per-codon table
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::merge::MergedRecord;

/// Header of the merged table, in output order
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "chrom",
    "asite_start",
    "asite_end",
    "gene_name",
    "codon_idx",
    "gene_strand",
    "codon",
    "TPM",
    "pair_prob",
];

/// Default placeholder for codons without a pairing probability
pub const MISSING_VALUE: &str = "NA";

/// Format a float like the upstream tables do.
///
/// Shortest round-trip digits; integral values keep `.0`; decimal exponents
/// below -4 or from 16 up switch to scientific notation with a signed,
/// two-digit exponent (`1e-05`, `1.5e+16`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return format!("{value:.1}");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn to_fields(row: &MergedRecord, missing: &str) -> [String; 9] {
    let codon = &row.codon;
    [
        codon.chrom.clone(),
        codon.asite_start.clone(),
        codon.asite_end.clone(),
        codon.gene_name.clone(),
        codon.codon_idx.to_string(),
        codon.gene_strand.clone(),
        codon.codon.clone(),
        format_float(row.tpm),
        row.pair_prob
            .map(format_float)
            .unwrap_or_else(|| missing.to_string()),
    ]
}

/// Write merged rows as a tab-delimited table with a header row
///
/// `missing` replaces absent pairing probabilities only.
pub fn write_merged<P: AsRef<Path>>(path: P, rows: &[MergedRecord], missing: &str) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(BufWriter::new(file));

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.write_record(to_fields(row, missing))?;
    }
    writer
        .flush()
        .with_context(|| format!("Cannot write {}", path.display()))?;

    Ok(())
}
