//! Word-list and values-buffer encoding.
//!
//! The values buffer is a headerless run of little-endian `f32`, one row per
//! word in word-list order. Readers recover the row width from the word count.

use crate::error::PackError;
use crate::structs::{Packed, PackStats, Source};
use crate::vocabulary::{BlankLines, Vocabulary, build_vocabulary};

const F32_BYTES: usize = std::mem::size_of::<f32>();

pub fn encode_words(words: &[String]) -> Result<String, PackError> {
    Ok(serde_json::to_string(words)?)
}

pub fn decode_words(json: &str) -> Result<Vec<String>, PackError> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_values(vocabulary: &Vocabulary) -> Vec<u8> {
    let mut buf = Vec::with_capacity(vocabulary.len() * vocabulary.dimension * F32_BYTES);
    for v in vocabulary.embeddings.iter().flatten() {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf
}

/// Reinterprets a values buffer as `word_count` rows, returning the flat
/// row-major matrix and the inferred row width.
pub fn decode_values(bytes: &[u8], word_count: usize) -> Result<(Vec<f32>, usize), PackError> {
    let invalid = || PackError::BufferLength {
        len: bytes.len(),
        word_count,
    };
    if bytes.len() % F32_BYTES != 0 {
        return Err(invalid());
    }
    let floats = bytes.len() / F32_BYTES;
    let dimension = match (floats, word_count) {
        (0, _) => 0,
        (_, 0) => return Err(invalid()),
        (n, rows) if n % rows == 0 => n / rows,
        _ => return Err(invalid()),
    };

    let values = bytes
        .chunks_exact(F32_BYTES)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    Ok((values, dimension))
}

/// Parses, deduplicates and serializes `sources` in one pass.
pub fn pack(
    sources: &[Source],
    blank_lines: BlankLines,
) -> Result<(Packed, Vocabulary, PackStats), PackError> {
    let (vocabulary, stats) = build_vocabulary(sources, blank_lines)?;
    let packed = Packed {
        words_json: encode_words(&vocabulary.words)?,
        values: encode_values(&vocabulary),
    };
    Ok((packed, vocabulary, stats))
}
