use clap::Parser;
use std::path::PathBuf;

use ribomerge::output::MISSING_VALUE;
use ribomerge::pair_prob::FIRST_CODON_IDX;
use ribomerge::{logging, run, MergeConfig};

/// ribomerge - merge Ribo-seq codon tables with RNA structure and expression
///
/// Joins a codon table with transcript TPM (Salmon or Kallisto) and per-codon
/// RNA secondary-structure pairing probabilities into one tab-delimited table.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Args {
    /// Data-frame file of the codon table
    #[clap(short = 'f', long = "codons", value_name = "FILE", required = true)]
    codons: PathBuf,

    /// Arrays of RNA secondary structure pairing probabilities
    #[clap(short = 's', long = "pair-probs", value_name = "FILE", required = true)]
    pair_probs: PathBuf,

    /// Pre-computed TPM table from Salmon (quant.sf) or Kallisto (abundance.tsv)
    #[clap(short = 't', long = "tpm", value_name = "FILE", required = true)]
    tpm: PathBuf,

    /// Output directory, created if missing
    #[clap(short = 'o', long = "output", value_name = "DIR", required = true)]
    output: PathBuf,

    /// Codon index of the first pairing probability of each gene
    #[clap(long = "first-codon-idx", default_value_t = FIRST_CODON_IDX, allow_hyphen_values = true)]
    first_codon_idx: i64,

    /// Placeholder written for codons without a pairing probability
    #[clap(long = "na-rep", default_value = MISSING_VALUE)]
    na_rep: String,

    /// Quiet mode (errors only)
    #[clap(long = "quiet")]
    quiet: bool,
}

impl From<Args> for MergeConfig {
    fn from(args: Args) -> Self {
        MergeConfig::new(args.codons, args.pair_probs, args.tpm, args.output)
            .with_first_codon_idx(args.first_codon_idx)
            .with_missing_value(args.na_rep)
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.quiet) {
        eprintln!("Cannot initialize logging: {e}");
    }

    let config = MergeConfig::from(args);
    if let Err(e) = run(&config) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
