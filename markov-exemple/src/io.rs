use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::io;

use markov_core::model::config::GeneratorConfig;

/// Reads a text corpus and returns its phrases, one per line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Drops blank lines
pub(crate) fn read_phrases<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
    let mut contents = String::new();
    File::open(filename)?.read_to_string(&mut contents)?;
    Ok(contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect())
}

/// Loads a JSON generator config.
///
/// Missing fields take their default values. The config is validated
/// before being returned.
pub(crate) fn read_config<P: AsRef<Path>>(filename: P) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let config: GeneratorConfig = serde_json::from_reader(file)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn blank_lines_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "the cat sat\r\n\n   \nthe dog ran\n").unwrap();

        let phrases = read_phrases(file.path()).unwrap();
        assert_eq!(phrases, vec!["the cat sat", "the dog ran"]);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "order": 3, "ensure_unique": true }}"#).unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.order(), 3);
        assert!(config.ensure_unique);
        assert_eq!(config.max_tokens(), 1500);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "order": 0 }}"#).unwrap();

        assert!(read_config(file.path()).is_err());
    }
}
