//! Query side of a packed vocabulary.
//!
//! A [`WordEmbedding`] owns the flat `(N, D)` matrix read back from the values
//! buffer. Similarity is a plain dot product, so rows are expected to be
//! L2-normalised (the `embed` command writes them that way).

use std::collections::HashMap;
use std::path::Path;

use crate::algorithms::{dot, norm};
use crate::error::PackError;
use crate::file_manager::read_packed;
use crate::structs::Neighbor;
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone)]
pub struct WordEmbedding {
    words: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f32>,
    dimension: usize,
    directions: HashMap<(String, String), Vec<f32>>,
}

impl WordEmbedding {
    /// `values` must hold `words.len() * dimension` floats.
    pub fn new(words: Vec<String>, values: Vec<f32>, dimension: usize) -> Result<Self, PackError> {
        if values.len() != words.len() * dimension {
            return Err(PackError::BufferLength {
                len: values.len() * std::mem::size_of::<f32>(),
                word_count: words.len(),
            });
        }
        // First index wins, matching the packer for hand-built word lists.
        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            index.entry(word.clone()).or_insert(i);
        }
        Ok(Self {
            words,
            index,
            values,
            dimension,
            directions: HashMap::new(),
        })
    }

    pub fn from_vocabulary(vocabulary: Vocabulary) -> Result<Self, PackError> {
        let values = vocabulary.embeddings.into_iter().flatten().collect();
        Self::new(vocabulary.words, values, vocabulary.dimension)
    }

    pub fn load(words_path: &Path, values_path: &Path) -> Result<Self, PackError> {
        let (words, values, dimension) = read_packed(words_path, values_path)?;
        Self::new(words, values, dimension)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn embedding(&self, word: &str) -> Result<&[f32], PackError> {
        let i = self
            .index_of(word)
            .ok_or_else(|| PackError::UnknownWord(word.to_string()))?;
        Ok(self.row(i))
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Top `k` words by dot product with `word`, best first.
    pub fn nearest(&self, word: &str, k: usize) -> Result<Vec<Neighbor>, PackError> {
        let query = self.embedding(word)?;
        let mut scored: Vec<(usize, f32)> = (0..self.len())
            .map(|i| (i, dot(self.row(i), query)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| Neighbor {
                word: self.words[i].clone(),
                score,
            })
            .collect())
    }

    /// Unit vector pointing from `left` to `right`.
    pub fn bias_direction(&self, left: &str, right: &str) -> Result<Vec<f32>, PackError> {
        let l = self.embedding(left)?;
        let r = self.embedding(right)?;
        let mut direction: Vec<f32> = r.iter().zip(l).map(|(r, l)| r - l).collect();
        let length = norm(&direction);
        if length > 0.0 {
            direction.iter_mut().for_each(|v| *v /= length);
        }
        Ok(direction)
    }

    /// Similarity of `word` to the `left -> right` axis.
    pub fn project(&mut self, word: &str, left: &str, right: &str) -> Result<f32, PackError> {
        let i = self
            .index_of(word)
            .ok_or_else(|| PackError::UnknownWord(word.to_string()))?;
        let key = (left.to_string(), right.to_string());
        if !self.directions.contains_key(&key) {
            let direction = self.bias_direction(left, right)?;
            self.directions.insert(key.clone(), direction);
        }
        Ok(dot(self.row(i), &self.directions[&key]))
    }

    /// The `k` nearest neighbours of `word`, scored and sorted ascending by
    /// their projection on the `left -> right` axis.
    pub fn project_nearest(
        &mut self,
        word: &str,
        left: &str,
        right: &str,
        k: usize,
    ) -> Result<Vec<Neighbor>, PackError> {
        let mut projected = Vec::with_capacity(k);
        for neighbor in self.nearest(word, k)? {
            let score = self.project(&neighbor.word, left, right)?;
            projected.push(Neighbor {
                word: neighbor.word,
                score,
            });
        }
        projected.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(projected)
    }

    /// Distance of `word` from `left` along the `left -> right` axis, in axis
    /// lengths: the length of the projection of `word - left` onto the axis
    /// divided by the axis length. Unsigned, so 0.0 at `left` and 1.0 at
    /// `right` and at the mirror point on the far side of `left`.
    pub fn axis_position(&self, word: &str, left: &str, right: &str) -> Result<f32, PackError> {
        let w = self.embedding(word)?;
        let l = self.embedding(left)?;
        let r = self.embedding(right)?;
        let axis: Vec<f32> = r.iter().zip(l).map(|(r, l)| r - l).collect();
        let axis_sq = dot(&axis, &axis);
        if axis_sq == 0.0 {
            return Ok(0.0);
        }
        let offset: Vec<f32> = w.iter().zip(l).map(|(w, l)| w - l).collect();
        Ok(dot(&offset, &axis).abs() / axis_sq)
    }
}
