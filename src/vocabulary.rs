//! Ordered, deduplicated vocabulary construction.
//!
//! Lines from every source are visited in order. The first occurrence of a
//! word decides both its position and its vector; later occurrences are
//! dropped. Every parsed vector must have the length of the first one.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PackError;
use crate::parser::parse_line;
use crate::structs::{Entry, Location, PackStats, Source};

/// What to do with empty lines, including the one left after a trailing newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlankLines {
    /// Drop empty lines before parsing.
    #[default]
    Skip,
    /// Parse empty lines as an entry with an empty word and no components.
    Keep,
}

/// Words in first-seen order with their index-aligned vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    pub words: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub dimension: usize,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    Duplicate,
}

#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    seen: HashSet<String>,
    words: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parsed entry unless its word was already inserted.
    pub fn push(&mut self, entry: Entry, at: Location<'_>) -> Result<Insertion, PackError> {
        let found = entry.vector.len();
        let expected = *self.dimension.get_or_insert(found);
        if found != expected {
            return Err(PackError::Dimension {
                source_name: at.source.to_string(),
                line: at.line,
                word: entry.word,
                expected,
                found,
            });
        }

        if self.seen.contains(&entry.word) {
            debug!(word = %entry.word, source = at.source, line = at.line, "skipping duplicate word");
            return Ok(Insertion::Duplicate);
        }

        self.seen.insert(entry.word.clone());
        self.words.push(entry.word);
        self.embeddings.push(entry.vector);
        Ok(Insertion::Inserted)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn build(self) -> Vocabulary {
        Vocabulary {
            words: self.words,
            embeddings: self.embeddings,
            dimension: self.dimension.unwrap_or(0),
        }
    }
}

/// Builds the vocabulary of the concatenation of `sources`, in order.
pub fn build_vocabulary(
    sources: &[Source],
    blank_lines: BlankLines,
) -> Result<(Vocabulary, PackStats), PackError> {
    let mut builder = VocabularyBuilder::new();
    let mut stats = PackStats {
        sources: sources.len(),
        ..PackStats::default()
    };

    for source in sources {
        for (i, line) in source.text.split('\n').enumerate() {
            let at = Location {
                source: &source.name,
                line: i + 1,
            };
            if blank_lines == BlankLines::Skip && line.trim_end_matches('\r').is_empty() {
                stats.blank_lines += 1;
                continue;
            }
            stats.lines += 1;

            let entry = parse_line(line).map_err(|source| PackError::Parse {
                source_name: at.source.to_string(),
                line: at.line,
                source,
            })?;
            if builder.push(entry, at)? == Insertion::Duplicate {
                stats.duplicates += 1;
            }
        }
        debug!(source = %source.name, words = builder.len(), "source consumed");
    }

    let vocabulary = builder.build();
    info!(
        words = vocabulary.len(),
        dimension = vocabulary.dimension,
        duplicates = stats.duplicates,
        blank_lines = stats.blank_lines,
        "vocabulary built"
    );
    Ok((vocabulary, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(texts: &[&str]) -> Vec<Source> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Source::new(format!("src{i}"), *text))
            .collect()
    }

    #[test]
    fn first_occurrence_wins_across_sources() {
        let input = sources(&["cat 0.1 0.2\ndog 0.3 0.4\n", "cat 9.9 9.9\nbird 0.5 0.6\n"]);
        let (vocab, stats) = build_vocabulary(&input, BlankLines::Skip).unwrap();
        assert_eq!(vocab.words, vec!["cat", "dog", "bird"]);
        assert_eq!(vocab.embeddings[0], vec![0.1, 0.2]);
        assert_eq!(vocab.dimension, 2);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.blank_lines, 2);
        assert_eq!(stats.lines, 4);
    }

    #[test]
    fn duplicates_within_one_source_are_dropped() {
        let input = sources(&["a 1\nb 2\na 3\nb 4\nc 5"]);
        let (vocab, _) = build_vocabulary(&input, BlankLines::Skip).unwrap();
        assert_eq!(vocab.words, vec!["a", "b", "c"]);
        assert_eq!(vocab.embeddings, vec![vec![1.0], vec![2.0], vec![5.0]]);
    }

    #[test]
    fn empty_source_gives_empty_vocabulary() {
        let input = sources(&[""]);
        let (vocab, stats) = build_vocabulary(&input, BlankLines::Skip).unwrap();
        assert!(vocab.is_empty());
        assert_eq!(vocab.dimension, 0);
        assert_eq!(stats.blank_lines, 1);
    }

    #[test]
    fn crlf_blank_lines_are_skipped() {
        let input = sources(&["a 1 2\r\n\r\nb 3 4\r\n"]);
        let (vocab, stats) = build_vocabulary(&input, BlankLines::Skip).unwrap();
        assert_eq!(vocab.words, vec!["a", "b"]);
        assert_eq!(vocab.embeddings, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(stats.blank_lines, 2);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn dimension_mismatch_fails_with_location() {
        let input = sources(&["a 1 2\n", "b 3 4\nc 5\n"]);
        let err = build_vocabulary(&input, BlankLines::Skip).unwrap_err();
        match err {
            PackError::Dimension {
                source_name,
                line,
                word,
                expected,
                found,
            } => {
                assert_eq!(source_name, "src1");
                assert_eq!(line, 2);
                assert_eq!(word, "c");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_duplicate_still_fails() {
        let input = sources(&["a 1 2\na 1 x\n"]);
        let err = build_vocabulary(&input, BlankLines::Skip).unwrap_err();
        assert!(matches!(err, PackError::Parse { line: 2, .. }));
    }

    #[test]
    fn kept_blank_line_breaks_nonzero_dimension() {
        let input = sources(&["a 1 2\n"]);
        let err = build_vocabulary(&input, BlankLines::Keep).unwrap_err();
        assert!(matches!(err, PackError::Dimension { found: 0, expected: 2, .. }));
    }

    #[test]
    fn kept_blank_line_enters_vocabulary_when_dimension_is_zero() {
        let input = sources(&["a\n"]);
        let (vocab, _) = build_vocabulary(&input, BlankLines::Keep).unwrap();
        assert_eq!(vocab.words, vec!["a", ""]);
    }

    #[test]
    fn builder_reports_duplicate_insertions() {
        let mut builder = VocabularyBuilder::new();
        let at = Location {
            source: "mem",
            line: 1,
        };
        let entry = Entry {
            word: "x".to_string(),
            vector: vec![1.0],
        };
        assert_eq!(builder.push(entry.clone(), at).unwrap(), Insertion::Inserted);
        assert_eq!(builder.push(entry, at).unwrap(), Insertion::Duplicate);
        assert_eq!(builder.len(), 1);
    }
}
