/// File-system helpers shared by the loaders and the writer
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Extension given to the merged table
pub const OUTPUT_EXTENSION: &str = "bed";

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false)
}

/// Open a file and auto-detect gzip compression, returning a boxed BufRead
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Build a tab-delimited csv reader over a (possibly gzipped) file with a header row
pub fn tsv_reader<P: AsRef<Path>>(path: P) -> Result<csv::Reader<Box<dyn BufRead>>> {
    let input = open_input(path)?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(input))
}

/// Destination of the merged table: `<output_dir>/<codon basename minus extension>.bed`
///
/// A trailing compression suffix is dropped before the last extension, so
/// `codons.txt.gz` and `codons.txt` both map to `codons.bed`.
pub fn output_path<P: AsRef<Path>, Q: AsRef<Path>>(output_dir: P, codon_path: Q) -> PathBuf {
    let codon_path = codon_path.as_ref();
    let mut stem = PathBuf::from(codon_path.file_name().unwrap_or_default());

    if is_gzipped(&stem) {
        stem.set_extension("");
    }
    stem.set_extension(OUTPUT_EXTENSION);

    output_dir.as_ref().join(stem)
}

/// Create the output directory (and parents) if it does not exist yet
pub fn ensure_output_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path("out", "data/sample.codons.txt"),
            PathBuf::from("out/sample.codons.bed")
        );
        assert_eq!(
            output_path("out/nested", "sample.txt.gz"),
            PathBuf::from("out/nested/sample.bed")
        );
        assert_eq!(output_path("out", "noext"), PathBuf::from("out/noext.bed"));
    }

    #[test]
    fn test_open_gzipped_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probs.txt.gz");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"geneA\t0.1 0.2\n").unwrap();
        encoder.finish().unwrap();

        let mut content = String::new();
        open_input(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "geneA\t0.1 0.2\n");
    }

    #[test]
    fn test_open_missing_input() {
        let err = open_input("/nonexistent/ribomerge/input.txt").err().unwrap();
        assert!(err.to_string().contains("Cannot open"));
    }

    #[test]
    fn test_ensure_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_output_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directory is fine
        ensure_output_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_output_dir_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, "").unwrap();

        assert!(ensure_output_dir(&file).is_err());
    }
}
