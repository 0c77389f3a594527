use crate::error::LineError;
use crate::structs::Entry;

/// Parses one `word v1 v2 ... vD` line.
///
/// Tokens are separated by a single space. An empty line yields an entry with
/// an empty word and an empty vector; whether that entry is kept is up to the
/// caller.
pub fn parse_line(line: &str) -> Result<Entry, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut tokens = line.split(' ');
    let word = tokens.next().unwrap_or_default().to_string();

    let vector = tokens
        .enumerate()
        .map(|(i, token)| {
            token.parse::<f32>().map_err(|_| LineError::Number {
                token: token.to_string(),
                column: i + 1,
            })
        })
        .collect::<Result<Vec<f32>, LineError>>()?;

    Ok(Entry { word, vector })
}

/// Formats an entry back into the text line format read by [`parse_line`].
pub fn format_line(word: &str, vector: &[f32]) -> String {
    let mut line = word.replace(' ', "_");
    for v in vector {
        line.push(' ');
        line.push_str(&v.to_string());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_and_components() {
        let entry = parse_line("cat 0.1 0.2 -3").unwrap();
        assert_eq!(entry.word, "cat");
        assert_eq!(entry.vector, vec![0.1, 0.2, -3.0]);
    }

    #[test]
    fn empty_line_is_degenerate_entry() {
        let entry = parse_line("").unwrap();
        assert_eq!(entry.word, "");
        assert!(entry.vector.is_empty());
    }

    #[test]
    fn word_without_components_has_empty_vector() {
        let entry = parse_line("lonely").unwrap();
        assert_eq!(entry.word, "lonely");
        assert!(entry.vector.is_empty());
    }

    #[test]
    fn carriage_return_is_ignored() {
        let entry = parse_line("dog 0.5 1.5\r").unwrap();
        assert_eq!(entry.vector, vec![0.5, 1.5]);
    }

    #[test]
    fn non_numeric_token_reports_column() {
        let err = parse_line("cat 0.1 abc").unwrap_err();
        assert_eq!(
            err,
            LineError::Number {
                token: "abc".to_string(),
                column: 2,
            }
        );
    }

    #[test]
    fn doubled_space_yields_empty_token_error() {
        let err = parse_line("cat  0.1").unwrap_err();
        assert!(matches!(err, LineError::Number { ref token, column: 1 } if token.is_empty()));
    }

    #[test]
    fn format_line_round_trips_through_parser() {
        let line = format_line("new york", &[0.25, -1.0]);
        assert_eq!(line, "new_york 0.25 -1");
        let entry = parse_line(&line).unwrap();
        assert_eq!(entry.word, "new_york");
        assert_eq!(entry.vector, vec![0.25, -1.0]);
    }
}
