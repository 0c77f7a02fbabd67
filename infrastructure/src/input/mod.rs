//! Candidate list loader.
//!
//! Input files carry one candidate name per line; blank lines and
//! surrounding whitespace are ignored.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot read input file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Input file '{0}' contains no candidate names")]
    Empty(String),
}

/// Read candidate names from a text file.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(InputError::Empty(path.display().to_string()));
    }

    info!("Loaded {} name(s) from {}", names.len(), path.display());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_trimmed_nonempty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Ada Lovelace").unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  Steve Jobs  ").unwrap();
        writeln!(file).unwrap();
        drop(file);

        let names = load_candidates(&path).unwrap();
        assert_eq!(names, vec!["Ada Lovelace", "Steve Jobs"]);
    }

    #[test]
    fn test_blank_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\n  \n").unwrap();

        let err = load_candidates(&path).unwrap_err();
        assert!(matches!(err, InputError::Empty(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_candidates("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
