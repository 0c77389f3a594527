use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use tracing::{info, warn};

use crate::algorithms::autocomplete;
use crate::codec::pack;
use crate::config::{EmbedSettings, PackSettings, PackedArgs, QuerySettings, load_settings};
use crate::draw::{clear_lines_below, draw_header, draw_projections, draw_suggestions};
use crate::embedder;
use crate::embedding::WordEmbedding;
use crate::file_manager::{read_sources, read_word_list, write_packed, write_text_embeddings};
use crate::structs::terminal_guard::TerminalGuard;
use crate::vocabulary::BlankLines;

pub fn run_pack(
    inputs: Vec<PathBuf>,
    words_out: Option<PathBuf>,
    values_out: Option<PathBuf>,
    blank_lines: Option<BlankLines>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut settings = load_settings::<PackSettings>("pack", config)?;
    if !inputs.is_empty() {
        settings.inputs = inputs;
    }
    if let Some(path) = words_out {
        settings.words_out = path;
    }
    if let Some(path) = values_out {
        settings.values_out = path;
    }
    if let Some(policy) = blank_lines {
        settings.blank_lines = policy;
    }
    if settings.inputs.is_empty() {
        bail!("no input files given");
    }

    let sources = read_sources(&settings.inputs).context("failed to read input embeddings")?;
    let (packed, vocabulary, stats) =
        pack(&sources, settings.blank_lines).context("failed to pack embeddings")?;
    write_packed(&packed, &settings.words_out, &settings.values_out)
        .context("failed to write packed embeddings")?;

    println!(
        "Packed {} words x {} dims from {} file(s), {} duplicate(s) skipped",
        vocabulary.len(),
        vocabulary.dimension,
        stats.sources,
        stats.duplicates
    );
    Ok(())
}

pub fn run_embed(
    word_list: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut settings = load_settings::<EmbedSettings>("embed", config)?;
    if let Some(path) = word_list {
        settings.word_list = path;
    }
    if let Some(path) = output {
        settings.output = path;
    }

    let words = read_word_list(&settings.word_list)?;
    if words.is_empty() {
        warn!(path = %settings.word_list.display(), "word list is empty");
    }
    let mut model = embedder::get_model(settings.show_download_progress)?;
    let embeddings = embedder::embed_words(&mut model, &words)?;
    write_text_embeddings(&words, &embeddings, &settings.output)?;
    println!("Embeddings saved to {}", settings.output.display());
    Ok(())
}

fn load_query(args: PackedArgs) -> Result<(QuerySettings, WordEmbedding)> {
    let mut settings = load_settings::<QuerySettings>("query", args.config.clone())?;
    settings.apply(args);
    let embedding = WordEmbedding::load(&settings.words, &settings.values).with_context(|| {
        format!(
            "failed to load packed embeddings from {} and {}",
            settings.words.display(),
            settings.values.display()
        )
    })?;
    info!(
        words = embedding.len(),
        dimension = embedding.dimension(),
        "packed embeddings loaded"
    );
    Ok((settings, embedding))
}

pub fn run_nearest(word: String, neighbors: Option<usize>, args: PackedArgs) -> Result<()> {
    let (settings, embedding) = load_query(args)?;
    let k = neighbors.unwrap_or(settings.neighbors);

    let nearest = embedding.nearest(&word, k)?;
    println!(
        "{:<24} {:>10} {:>10}",
        "word",
        "similarity",
        format!("{}->{}", settings.left, settings.right)
    );
    for n in nearest {
        let position = embedding.axis_position(&n.word, &settings.left, &settings.right)?;
        println!("{:<24} {:>10.4} {:>10.4}", n.word, n.score, position);
    }
    Ok(())
}

pub fn run_explore(args: PackedArgs) -> Result<()> {
    let (settings, mut embedding) = load_query(args)?;
    for axis_word in [&settings.left, &settings.right] {
        if !embedding.has_word(axis_word) {
            bail!("axis word {axis_word:?} is not in the vocabulary");
        }
    }

    let mut typed = String::new();
    let mut last_drawn = 0;
    let mut stdout = io::stdout();

    let _guard = TerminalGuard::new()?;

    draw_header(&mut stdout, &typed, false, "")?;

    loop {
        if !event::poll(Duration::from_millis(10))? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            break;
        }

        let start_time = Instant::now();
        clear_lines_below(&mut stdout, last_drawn)?;
        last_drawn = 0;

        match key_event.code {
            KeyCode::Esc => break,
            KeyCode::Backspace => {
                typed.pop();
            }
            KeyCode::Char(c) => typed.push(c),
            KeyCode::Enter if embedding.has_word(&typed) => {
                let neighbors = embedding.project_nearest(
                    &typed,
                    &settings.left,
                    &settings.right,
                    settings.neighbors,
                )?;
                draw_projections(&mut stdout, &neighbors, &settings.left, &settings.right)?;
                last_drawn = neighbors.len() + 1;
            }
            KeyCode::Tab => {
                if let Some(first) = autocomplete(&typed, embedding.words(), 1).pop() {
                    typed = first.text;
                }
            }
            _ => {}
        }

        if last_drawn == 0 {
            let suggestions = autocomplete(&typed, embedding.words(), settings.suggestions);
            draw_suggestions(&mut stdout, &suggestions)?;
            last_drawn = suggestions.len();
        }

        let status = format!("{:.2}ms", start_time.elapsed().as_secs_f64() * 1000.0);
        draw_header(&mut stdout, &typed, embedding.has_word(&typed), &status)?;
        stdout.flush()?;
    }
    clear_lines_below(&mut stdout, last_drawn)?;
    Ok(())
}
