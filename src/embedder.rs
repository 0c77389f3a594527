use anyhow::{Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::algorithms;

pub fn get_model(show_download_progress: bool) -> Result<TextEmbedding> {
    TextEmbedding::try_new(
        InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(show_download_progress),
    )
    .context("failed to initialise the embedding model")
}

/// Embeds every word and L2-normalises the resulting vectors.
pub fn embed_words(model: &mut TextEmbedding, words: &[String]) -> Result<Vec<Vec<f32>>> {
    info!(words = words.len(), "generating word embeddings");
    let documents: Vec<&str> = words.iter().map(String::as_str).collect();
    let mut embeddings = model
        .embed(documents, None)
        .context("embedding model failed")?;
    algorithms::normalize_embeddings(&mut embeddings);
    Ok(embeddings)
}
