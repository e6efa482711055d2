//! Fixtures shared by the integration tests
#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

pub const CODON_HEADER: &str =
    "chrom\tasite_start\tasite_end\tgene_name\tcodon_idx\tgene_strand\tcodon\n";

/// Paths of one set of pipeline inputs
pub struct Inputs {
    pub codons: PathBuf,
    pub pair_probs: PathBuf,
    pub tpm: PathBuf,
}

/// Codon rows for `gene` covering `first..first + n`, three bases apart
pub fn codon_rows(chrom: &str, gene: &str, first: i64, n: usize, start: u64) -> String {
    let bases = ["ATG", "GCT", "AAA", "TTG", "CGC", "GGA"];
    (0..n)
        .map(|i| {
            let a_start = start + 3 * i as u64;
            format!(
                "{chrom}\t{a_start}\t{}\t{gene}\t{}\t+\t{}\n",
                a_start + 3,
                first + i as i64,
                bases[i % bases.len()]
            )
        })
        .collect()
}

/// Write a small yeast-like data set:
/// - YAL001C: expressed, probabilities for codons -8..-6 only
/// - YAL002W: expressed, no probabilities
/// - YAL003W: not expressed
pub fn write_inputs(dir: &Path) -> Inputs {
    let codons = dir.join("sample.codons.txt");
    let pair_probs = dir.join("sample.pairprob.txt");
    let tpm = dir.join("quant.sf");

    let mut table = CODON_HEADER.to_string();
    table.push_str(&codon_rows("chrI", "YAL001C", -8, 4, 1000));
    table.push_str(&codon_rows("chrI", "YAL002W", -8, 2, 5000));
    table.push_str(&codon_rows("chrI", "YAL003W", -8, 3, 9000));
    fs::write(&codons, table).expect("Failed to write codon table");

    fs::write(&pair_probs, "YAL001C\t0.1 0.2 0.3\nYAL009W\t0.9\n")
        .expect("Failed to write pairing probabilities");

    fs::write(
        &tpm,
        "Name\tLength\tEffectiveLength\tTPM\tNumReads\n\
         YAL001C\t1500\t1351.2\t12.5\t310\n\
         YAL002W\t900\t751.0\t3.0\t40\n\
         YAL010C\t600\t451.0\t8.0\t12\n",
    )
    .expect("Failed to write TPM table");

    Inputs {
        codons,
        pair_probs,
        tpm,
    }
}

/// Parse a tab-delimited table into (header, rows)
pub fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .expect("Failed to open table");
    let header = reader
        .headers()
        .expect("Failed to read header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}
