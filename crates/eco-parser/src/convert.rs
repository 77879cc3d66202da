use std::fs;
use std::path::{Path, PathBuf};

use eco_core::{ConvertConfig, ConvertError, Diagnostic};
use tracing::debug;

use crate::{parse, summary_json};

/// Outcome of a successful file-to-file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub node_count: usize,
    pub link_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read the catalogue, build the graph and write the JSON document.
///
/// The input is read in full before anything is written, so a missing or
/// unreadable catalogue never leaves a partial output file behind.
pub fn convert_file(config: &ConvertConfig) -> Result<ConvertReport, ConvertError> {
    let source = fs::read_to_string(&config.input).map_err(|source| ConvertError::ReadInput {
        path: config.input.clone(),
        source,
    })?;

    let parsed = parse(&source);
    debug!("Parse summary: {}", summary_json(&parsed));
    let rendered = parsed.document.to_pretty_json(config.indent)?;
    write_document(&config.output, &rendered)?;

    Ok(ConvertReport {
        output: config.output.clone(),
        node_count: parsed.document.nodes.len(),
        link_count: parsed.document.links.len(),
        diagnostics: parsed.diagnostics,
    })
}

fn write_document(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_error = |source| ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, bytes).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use eco_core::{ConvertConfig, ConvertError};

    use super::convert_file;

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw_data.txt");
        fs::write(&input, "P001: A\n- Connections: P001\n").expect("write input");
        let config = ConvertConfig {
            input,
            output: dir.path().join("src").join("data.json"),
            indent: 2,
        };

        let report = convert_file(&config).expect("convert");
        assert_eq!(report.node_count, 1);
        assert_eq!(report.link_count, 1);
        assert_eq!(report.output, config.output);
        assert!(report.output.exists());
    }

    #[test]
    fn unreadable_input_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ConvertConfig {
            input: dir.path().join("absent.txt"),
            output: dir.path().join("data.json"),
            indent: 2,
        };

        let error = convert_file(&config).expect_err("missing input must fail");
        assert!(matches!(error, ConvertError::ReadInput { .. }));
        assert!(!config.output.exists());
    }
}
