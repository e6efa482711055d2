/// Joining codons with expression levels and pairing probabilities
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::codon::CodonRecord;
use crate::expression::ExpressionRecord;
use crate::pair_prob::PairProbRecord;

/// A codon row extended with its gene's TPM and its pairing probability
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub codon: CodonRecord,
    pub tpm: f64,
    /// `None` when no probability was given for this (gene, codon index)
    pub pair_prob: Option<f64>,
}

/// Row counts gathered while joining
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub codons: usize,
    /// Codon rows whose gene has no expression value
    pub dropped_codons: usize,
    pub merged_rows: usize,
    /// Output rows without a pairing probability
    pub missing_pair_prob: usize,
}

/// Gene name -> TPM values, in table order
fn index_expression(expression: &[ExpressionRecord]) -> IndexMap<&str, Vec<f64>> {
    let mut index: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for record in expression {
        index.entry(record.gene_name.as_str()).or_default().push(record.tpm);
    }
    index
}

/// Gene name -> codon index -> probabilities, in file order
fn index_pair_probs(pair_probs: &[PairProbRecord]) -> HashMap<&str, HashMap<i64, Vec<f64>>> {
    let mut index: HashMap<&str, HashMap<i64, Vec<f64>>> = HashMap::new();
    for record in pair_probs {
        index
            .entry(record.gene_name.as_str())
            .or_default()
            .entry(record.codon_idx)
            .or_default()
            .push(record.pair_prob);
    }
    index
}

/// Inner-join codons with expression on gene name, then left-join pairing
/// probabilities on (gene name, codon index).
///
/// Codon order is kept. A key matching several rows on the right side
/// repeats the codon once per match, in the order those rows were read.
pub fn merge_tables(
    codons: &[CodonRecord],
    expression: &[ExpressionRecord],
    pair_probs: &[PairProbRecord],
) -> (Vec<MergedRecord>, MergeSummary) {
    let tpm_by_gene = index_expression(expression);
    let prob_by_codon = index_pair_probs(pair_probs);

    let mut summary = MergeSummary {
        codons: codons.len(),
        ..Default::default()
    };
    let mut merged = Vec::with_capacity(codons.len());

    for codon in codons {
        let Some(tpms) = tpm_by_gene.get(codon.gene_name.as_str()) else {
            summary.dropped_codons += 1;
            continue;
        };

        let probs = prob_by_codon
            .get(codon.gene_name.as_str())
            .and_then(|by_idx| by_idx.get(&codon.codon_idx));

        for &tpm in tpms {
            match probs {
                Some(probs) => {
                    for &prob in probs {
                        merged.push(MergedRecord {
                            codon: codon.clone(),
                            tpm,
                            pair_prob: Some(prob),
                        });
                    }
                }
                None => {
                    summary.missing_pair_prob += 1;
                    merged.push(MergedRecord {
                        codon: codon.clone(),
                        tpm,
                        pair_prob: None,
                    });
                }
            }
        }
    }

    summary.merged_rows = merged.len();
    (merged, summary)
}
