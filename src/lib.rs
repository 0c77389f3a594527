//! Converts plain-text word embeddings (`word v1 ... vD` per line) into an
//! ordered, deduplicated JSON word list and a headerless little-endian `f32`
//! values buffer, and queries the packed pair back.

pub mod algorithms;
pub mod codec;
pub mod commands;
pub mod config;
pub mod draw;
pub mod embedder;
pub mod embedding;
pub mod error;
pub mod file_manager;
pub mod parser;
pub mod structs;
pub mod telemetry;
pub mod vocabulary;

pub use codec::{decode_values, decode_words, encode_values, encode_words, pack};
pub use embedding::WordEmbedding;
pub use error::{LineError, PackError};
pub use structs::{Entry, Packed, PackStats, Source};
pub use vocabulary::{BlankLines, Vocabulary, VocabularyBuilder, build_vocabulary};
