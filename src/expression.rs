/// Transcript expression (TPM) tables
///
/// Salmon `quant.sf` and Kallisto `abundance.tsv` files are both accepted.
/// The producing tool is recognised from the header and its columns are
/// renamed to `gene_name` / `TPM`.
use anyhow::{bail, Context, Result};
use csv::StringRecord;
use std::fmt;
use std::path::Path;

use crate::io::tsv_reader;
use crate::logging::STATUS;

/// Supported expression table layouts, detected in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionSchema {
    Salmon,
    Kallisto,
}

impl ExpressionSchema {
    pub const ALL: [ExpressionSchema; 2] = [ExpressionSchema::Salmon, ExpressionSchema::Kallisto];

    /// Column holding the transcript/gene identifier
    pub fn id_column(&self) -> &'static str {
        match self {
            ExpressionSchema::Salmon => "Name",
            ExpressionSchema::Kallisto => "target_id",
        }
    }

    /// Column holding the TPM value
    pub fn tpm_column(&self) -> &'static str {
        match self {
            ExpressionSchema::Salmon => "TPM",
            ExpressionSchema::Kallisto => "tpm",
        }
    }

    /// Pick the schema from its TPM column alone, Salmon first.
    ///
    /// The id column is not consulted: a table whose TPM column matches but
    /// whose id column is missing is rejected by the loader rather than
    /// matched against the next schema.
    pub fn detect(headers: &StringRecord) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|schema| headers.iter().any(|h| h == schema.tpm_column()))
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(|s| format!("{s} ({}, {})", s.id_column(), s.tpm_column()))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Display for ExpressionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionSchema::Salmon => write!(f, "Salmon"),
            ExpressionSchema::Kallisto => write!(f, "Kallisto"),
        }
    }
}

/// Expression level of one gene/transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionRecord {
    pub gene_name: String,
    pub tpm: f64,
}

/// Load an expression table, detecting whether it comes from Salmon or Kallisto
pub fn load_expression<P: AsRef<Path>>(
    path: P,
) -> Result<(ExpressionSchema, Vec<ExpressionRecord>)> {
    let path = path.as_ref();
    let mut reader = tsv_reader(path)?;

    let headers = reader
        .headers()
        .with_context(|| format!("Cannot read header of {}", path.display()))?
        .clone();

    let Some(schema) = ExpressionSchema::detect(&headers) else {
        bail!(
            "Check file format of {}: only {} tables are supported",
            path.display(),
            ExpressionSchema::supported()
        );
    };

    let position = |col: &str| headers.iter().position(|h| h == col);
    let Some(id_col) = position(schema.id_column()) else {
        bail!(
            "Check file format of {}: {schema} table has no '{}' column",
            path.display(),
            schema.id_column()
        );
    };
    // detect() matched on this column
    let tpm_col = position(schema.tpm_column()).unwrap_or_default();
    log::info!(target: STATUS, "TPM input is from {schema}");

    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Cannot read {}", path.display()))?;
        let (Some(gene_name), Some(tpm)) = (record.get(id_col), record.get(tpm_col)) else {
            bail!("{}: row {} has too few columns", path.display(), row + 1);
        };
        let tpm: f64 = tpm.trim().parse().with_context(|| {
            format!("{}: row {}: invalid TPM '{tpm}'", path.display(), row + 1)
        })?;

        records.push(ExpressionRecord {
            gene_name: gene_name.to_string(),
            tpm,
        });
    }

    Ok((schema, records))
}
