use crate::structs::Suggestion;

pub fn normalize_embeddings(embeddings: &mut [Vec<f32>]) {
    for emb in embeddings.iter_mut() {
        let n = norm(emb);
        if n > 0.0 {
            for v in emb.iter_mut() {
                *v /= n;
            }
        }
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

fn same_char(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn same_chars(a: &[char], b: &[char]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_char(*x, *y))
}

/// Prefix matches first, in vocabulary order, then fuzzy matches by score.
///
/// Characters are compared case-insensitively one at a time, so every match
/// index is a char position in the word as stored.
pub fn autocomplete(query: &str, words: &[String], limit: usize) -> Vec<Suggestion> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }
    let q: Vec<char> = query.chars().collect();
    let is_prefix = |w: &str| {
        let c: Vec<char> = w.chars().take(q.len()).collect();
        same_chars(&c, &q)
    };

    let mut suggestions: Vec<Suggestion> = words
        .iter()
        .filter(|w| is_prefix(w.as_str()))
        .take(limit)
        .map(|w| Suggestion {
            text: w.clone(),
            match_indices: (0..q.len()).collect(),
            score: 1000,
        })
        .collect();

    if suggestions.len() < limit {
        let mut fuzzy: Vec<Suggestion> = words
            .iter()
            .filter(|w| !is_prefix(w.as_str()))
            .filter_map(|w| fuzzy_match(query, w))
            .collect();
        fuzzy.sort_by(|a, b| b.score.cmp(&a.score));
        fuzzy.truncate(limit - suggestions.len());
        suggestions.extend(fuzzy);
    }
    suggestions
}

/// Scores `candidate` against `query`; `None` when not every query character
/// appears in order. Indices are char positions in `candidate`.
pub fn fuzzy_match(query: &str, candidate: &str) -> Option<Suggestion> {
    let q: Vec<char> = query.chars().collect();
    let c: Vec<char> = candidate.chars().collect();

    let mut score: usize = 0;
    let mut match_indices: Vec<usize> = Vec::new();

    if same_chars(&q, &c) {
        return Some(Suggestion {
            text: candidate.to_string(),
            match_indices: (0..c.len()).collect(),
            score: 1000,
        });
    }

    // Substring match, earlier is better
    if let Some(pos) = c.windows(q.len().max(1)).position(|w| same_chars(w, &q)) {
        score += 200 + q.len() * 10 + 100usize.saturating_sub(pos);
        match_indices = (pos..pos + q.len()).collect();
    } else {
        let mut last = 0;
        let mut gaps = 0;
        for qc in &q {
            let pos = c[last..].iter().position(|cc| same_char(*cc, *qc))?;
            let real = last + pos;
            if let Some(prev) = match_indices.last() {
                gaps += real - (prev + 1);
            }
            match_indices.push(real);
            last = real + 1;
        }
        score += match_indices.len() * 10 + 50usize.saturating_sub(gaps);
    }

    // Handles "hosue" -> "house"
    let dist = levenshtein(&q, &c);
    if dist <= 2 {
        score += (3 - dist) * 30;
    }

    Some(Suggestion {
        text: candidate.to_string(),
        match_indices,
        score: score.min(999),
    })
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut costs: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut last = i;
        costs[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let new = if same_char(*ca, *cb) {
                last
            } else {
                1 + last.min(costs[j]).min(costs[j + 1])
            };
            last = costs[j + 1];
            costs[j + 1] = new;
        }
    }

    costs[b.len()]
}
