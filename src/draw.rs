use crossterm::{
    cursor, execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use std::io;

use crate::structs::{Neighbor, Suggestion};

pub fn clear_lines_below(stdout: &mut io::Stdout, count: usize) -> io::Result<()> {
    for _ in 0..count {
        execute!(
            stdout,
            cursor::MoveDown(1),
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )?;
    }
    if count > 0 {
        execute!(stdout, cursor::MoveUp(count as u16))?;
    }
    Ok(())
}

/// Draws autocomplete rows below the cursor, matched characters in green.
pub fn draw_suggestions(stdout: &mut io::Stdout, suggestions: &[Suggestion]) -> io::Result<()> {
    for sug in suggestions {
        execute!(
            stdout,
            cursor::MoveDown(1),
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )?;
        for (i, ch) in sug.text.chars().enumerate() {
            let color = if sug.match_indices.contains(&i) {
                Color::Green
            } else {
                Color::Reset
            };
            execute!(stdout, SetForegroundColor(color), Print(ch))?;
        }
        execute!(stdout, SetForegroundColor(Color::Reset))?;
    }

    if !suggestions.is_empty() {
        execute!(stdout, cursor::MoveUp(suggestions.len() as u16))?;
    }
    Ok(())
}

/// Draws neighbours as bars centred on the axis midpoint; negative scores lean
/// towards `left`, positive towards `right`.
pub fn draw_projections(
    stdout: &mut io::Stdout,
    neighbors: &[Neighbor],
    left: &str,
    right: &str,
) -> io::Result<()> {
    let longest = neighbors
        .iter()
        .map(|n| n.word.chars().count())
        .max()
        .unwrap_or(0);
    let terminal_width = terminal::size().unwrap_or((80, 24)).0 as usize;
    let half = terminal_width.saturating_sub(longest + 12) / 2;
    let max_abs = neighbors
        .iter()
        .map(|n| n.score.abs())
        .fold(0.0f32, f32::max)
        .max(f32::EPSILON);

    execute!(
        stdout,
        cursor::MoveDown(1),
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::DarkGrey),
        Print(format!("{left} <-> {right}")),
    )?;
    for n in neighbors {
        let bar_len = ((n.score.abs() / max_abs) * half as f32).round() as usize;
        let (pad, bar_color) = if n.score < 0.0 {
            (half - bar_len.min(half), Color::Blue)
        } else {
            (half, Color::Magenta)
        };
        execute!(
            stdout,
            cursor::MoveDown(1),
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Reset),
            Print(&n.word),
            cursor::MoveToColumn((longest + 2 + pad) as u16),
            SetForegroundColor(bar_color),
            Print("█".repeat(bar_len)),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(" {:+.3}", n.score)),
            SetForegroundColor(Color::Reset),
        )?;
    }

    execute!(stdout, cursor::MoveUp(neighbors.len() as u16 + 1))?;
    Ok(())
}

pub fn draw_header(
    stdout: &mut io::Stdout,
    typed: &str,
    known: bool,
    status: &str,
) -> io::Result<()> {
    let (width, _) = terminal::size().unwrap_or((80, 24));
    let query_hint = "Word: ";
    let typed_color = if known { Color::Green } else { Color::Reset };
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::Reset),
        Print(query_hint),
        SetForegroundColor(typed_color),
        Print(typed),
        cursor::MoveToColumn(width.saturating_sub(status.chars().count() as u16)),
        SetForegroundColor(Color::DarkGrey),
        Print(status),
        SetForegroundColor(Color::Reset),
        cursor::MoveToColumn((typed.chars().count() + query_hint.len()) as u16)
    )?;
    Ok(())
}
