//! Formatting utilities for terminal output

use crate::core::{Mark, Outcome, WORD_LEN, Word};
use crate::rules::{AlphabetStatus, LetterStatus};
use crate::scoring::WordScore;
use colored::{ColoredString, Colorize};
use std::time::Duration;

/// Colour a letter by what is known about it
#[must_use]
pub fn paint_status(text: &str, status: LetterStatus) -> ColoredString {
    match status {
        LetterStatus::Unknown => text.white(),
        LetterStatus::Absent => text.bright_red().bold(),
        LetterStatus::PresentUnplaced => text.bright_yellow().bold(),
        LetterStatus::PresentPlaced => text.bright_green().bold(),
    }
}

/// Colour a guessed letter by its mark
#[must_use]
pub fn paint_mark(text: &str, mark: Mark) -> ColoredString {
    let status = match mark {
        Mark::Absent => LetterStatus::Absent,
        Mark::Elsewhere => LetterStatus::PresentUnplaced,
        Mark::Here => LetterStatus::PresentPlaced,
    };
    paint_status(text, status)
}

/// The alphabet A-Z, each letter coloured by status
#[must_use]
pub fn alphabet_line(alphabet: &AlphabetStatus, sep: &str) -> String {
    alphabet
        .iter()
        .map(|(letter, status)| paint_status(&letter.to_string(), status).to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Three rows drawing each letter of a guess in a coloured box
#[must_use]
pub fn word_rows(word: &Word, outcome: &Outcome) -> [String; 3] {
    std::array::from_fn(|row| {
        (0..WORD_LEN)
            .map(|i| {
                let cell = if row == 1 {
                    format!("| {} |", char::from(word.char_at(i)))
                } else {
                    " --- ".to_string()
                };
                paint_mark(&cell, outcome.mark_at(i)).to_string()
            })
            .collect::<Vec<_>>()
            .join("  ")
    })
}

/// Elapsed time as `mm:ss`
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whole percentage, rounded down
#[must_use]
pub fn percent(value: usize, total: usize) -> usize {
    if total == 0 { 0 } else { value * 100 / total }
}

/// `WORD (score/frequency), ...` with a trailing ellipsis when truncated
#[must_use]
pub fn score_list(scores: &[WordScore], total: usize) -> String {
    let mut items: Vec<String> = scores
        .iter()
        .map(|s| {
            if s.frequency > 0.0 {
                s.to_string()
            } else {
                format!("{} ({})", s.word, s.score)
            }
        })
        .collect();
    if total > scores.len() {
        items.push("...".to_string());
    }
    items.join(", ")
}

/// `N (WORD, WORD, ...)` listing the first matches
#[must_use]
pub fn match_list(matches: &[Word], total: usize) -> String {
    let mut items: Vec<String> = matches.iter().map(ToString::to_string).collect();
    if total > matches.len() {
        items.push("...".to_string());
    }
    format!("{total} ({})", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn elapsed_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(75_900)), "01:15");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn score_list_marks_truncation() {
        let scores = vec![
            WordScore {
                word: word("THEIR"),
                score: 38,
                frequency: 6.36,
            },
            WordScore {
                word: word("OTHER"),
                score: 33,
                frequency: 0.0,
            },
        ];
        assert_eq!(score_list(&scores, 2), "THEIR (38/6.36), OTHER (33)");
        assert_eq!(score_list(&scores, 10), "THEIR (38/6.36), OTHER (33), ...");
    }

    #[test]
    fn match_list_shows_total() {
        let matches = vec![word("APPLE")];
        assert_eq!(match_list(&matches, 1), "1 (APPLE)");
        assert_eq!(match_list(&matches, 7), "7 (APPLE, ...)");
        assert_eq!(match_list(&[], 0), "0 ()");
    }

    #[test]
    fn word_rows_box_each_letter() {
        let rows = word_rows(&word("HAPPY"), &"01210".parse().unwrap());
        for letter in ["| H |", "| A |", "| P |", "| Y |"] {
            assert!(rows[1].contains(letter));
        }
        assert_eq!(rows[0].matches(" --- ").count(), 5);
        assert_eq!(rows[2].matches(" --- ").count(), 5);
    }

    #[test]
    fn alphabet_line_lists_every_letter() {
        let line = alphabet_line(&AlphabetStatus::default(), " ");
        for letter in 'A'..='Z' {
            assert!(line.contains(letter));
        }
    }
}
