/// One parsed line of a text embedding file.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub word: String,
    pub vector: Vec<f32>,
}

/// A named block of text embedding lines, typically the contents of one file.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Where a line came from, used in error messages and logs.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    pub source: &'a str,
    pub line: usize,
}

/// Counters collected while building a vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackStats {
    pub sources: usize,
    pub lines: usize,
    pub blank_lines: usize,
    pub duplicates: usize,
}

/// Serialized artifacts ready to be written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Packed {
    pub words_json: String,
    pub values: Vec<u8>,
}

/// Autocomplete candidate with the character positions that matched the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub text: String,
    pub match_indices: Vec<usize>,
    pub score: usize,
}

/// A vocabulary word paired with a similarity or projection score.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub word: String,
    pub score: f32,
}

pub mod terminal_guard {
    use crossterm::terminal;
    use std::io;

    pub struct TerminalGuard;

    impl TerminalGuard {
        pub fn new() -> io::Result<Self> {
            terminal::enable_raw_mode()?;
            Ok(Self)
        }
    }

    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = terminal::disable_raw_mode();
        }
    }
}
