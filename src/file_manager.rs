use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::codec::{decode_values, decode_words};
use crate::error::PackError;
use crate::parser::format_line;
use crate::structs::{Packed, Source};

/// Reads a whole text file into a [`Source`] named after its path.
pub fn read_source(path: &Path) -> Result<Source, PackError> {
    let text = fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
    Ok(Source::new(path.display().to_string(), text))
}

/// Reads every path in order; the first unreadable file aborts the run.
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Source>, PackError> {
    paths.iter().map(|p| read_source(p.as_ref())).collect()
}

/// Reads a plain word list, one entry per non-empty line.
pub fn read_word_list(path: &Path) -> Result<Vec<String>, PackError> {
    let text = fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Writes `bytes` to a temporary file beside `path`; nothing appears at
/// `path` until the returned file is persisted.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, PackError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| PackError::io(path, e))?;
    file.write_all(bytes).map_err(|e| PackError::io(path, e))?;
    file.flush().map_err(|e| PackError::io(path, e))?;
    Ok(file)
}

/// Writes both artifacts or neither: each is staged first and only renamed
/// into place once both staged writes succeeded.
pub fn write_packed(packed: &Packed, words_path: &Path, values_path: &Path) -> Result<(), PackError> {
    let words = stage(words_path, packed.words_json.as_bytes())?;
    let values = stage(values_path, &packed.values)?;
    words
        .persist(words_path)
        .map_err(|e| PackError::io(words_path, e.error))?;
    values
        .persist(values_path)
        .map_err(|e| PackError::io(values_path, e.error))?;
    info!(
        words = %words_path.display(),
        values = %values_path.display(),
        bytes = packed.values.len(),
        "packed embeddings written"
    );
    Ok(())
}

/// Loads a words/values pair back as `(words, flat_values, dimension)`.
pub fn read_packed(
    words_path: &Path,
    values_path: &Path,
) -> Result<(Vec<String>, Vec<f32>, usize), PackError> {
    let json = fs::read_to_string(words_path).map_err(|e| PackError::io(words_path, e))?;
    let words = decode_words(&json)?;
    let bytes = fs::read(values_path).map_err(|e| PackError::io(values_path, e))?;
    let (values, dimension) = decode_values(&bytes, words.len())?;
    Ok((words, values, dimension))
}

/// Writes embeddings in the `word v1 ... vD` text format consumed by the packer.
pub fn write_text_embeddings(
    words: &[String],
    embeddings: &[Vec<f32>],
    path: &Path,
) -> Result<(), PackError> {
    let mut body = String::new();
    for (word, emb) in words.iter().zip(embeddings) {
        body.push_str(&format_line(word, emb));
        body.push('\n');
    }
    fs::write(path, body).map_err(|e| PackError::io(path, e))?;
    info!(path = %path.display(), words = words.len(), "text embeddings written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_source(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }

    #[test]
    fn failed_values_write_leaves_no_word_list() {
        let dir = tempdir().unwrap();
        let words_path = dir.path().join("w.json");
        let values_path = dir.path().join("no_such_dir").join("v.bin");
        let packed = Packed {
            words_json: r#"["cat"]"#.to_string(),
            values: 1.0f32.to_le_bytes().to_vec(),
        };

        let err = write_packed(&packed, &words_path, &values_path).unwrap_err();
        assert!(matches!(err, PackError::Io { ref path, .. } if path == &values_path));
        assert!(!words_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_packed_replaces_existing_artifacts() {
        let dir = tempdir().unwrap();
        let words_path = dir.path().join("w.json");
        let values_path = dir.path().join("v.bin");
        fs::write(&words_path, "stale").unwrap();
        let packed = Packed {
            words_json: "[]".to_string(),
            values: Vec::new(),
        };

        write_packed(&packed, &words_path, &values_path).unwrap();
        assert_eq!(fs::read_to_string(&words_path).unwrap(), "[]");
        assert_eq!(fs::metadata(&values_path).unwrap().len(), 0);
    }

    #[test]
    fn word_list_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "apple\n\n  pear \n").unwrap();
        assert_eq!(read_word_list(&path).unwrap(), vec!["apple", "pear"]);
    }

    #[test]
    fn text_embeddings_are_readable_as_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("emb.txt");
        let words = vec!["ice cream".to_string(), "tea".to_string()];
        write_text_embeddings(&words, &[vec![1.0, 0.0], vec![0.0, 1.0]], &path).unwrap();
        let source = read_source(&path).unwrap();
        assert_eq!(source.text, "ice_cream 1 0\ntea 0 1\n");
    }
}
