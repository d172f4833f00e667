//! Presentation shell
//!
//! Line-oriented terminal UI: lines starting with `:` are actions,
//! anything else is a spelling attempt. Rendering is a pure function of
//! quiz state written to any `Write`, so each mutation is followed by a
//! full re-render.

use crate::quiz::{Feedback, Quiz, QuizPhase};
use crate::SpellError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::{self, Write};

/// One user action, parsed from an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Submit(String),
    Next,
    Restart,
    Help,
    Quit,
    /// An unrecognized `:` command
    Unknown(String),
}

/// Aliases for the `:` commands
static COMMANDS: Lazy<HashMap<&'static str, Command>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("p", Command::Play);
    map.insert("play", Command::Play);
    map.insert("n", Command::Next);
    map.insert("next", Command::Next);
    map.insert("r", Command::Restart);
    map.insert("restart", Command::Restart);
    map.insert("h", Command::Help);
    map.insert("help", Command::Help);
    map.insert("q", Command::Quit);
    map.insert("quit", Command::Quit);
    map
});

impl Command {
    /// Parse one input line; `None` for blank lines
    pub fn parse(line: &str) -> Option<Command> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(rest) = trimmed.strip_prefix(':') {
            let name = rest.trim().to_lowercase();
            return Some(
                COMMANDS
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or(Command::Unknown(name)),
            );
        }

        // Anything else is a spelling attempt; the quiz does its own
        // trimming and case folding
        Some(Command::Submit(line.to_string()))
    }
}

/// Render the current quiz state
///
/// `warning` is the persistent configuration warning (missing/rejected
/// API key); it stays on screen until the configuration is fixed.
pub fn render(quiz: &Quiz, warning: Option<&str>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;

    if let Some(warning) = warning {
        writeln!(out, "⚠ {}", warning)?;
    }

    match quiz.phase() {
        QuizPhase::InProgress(_) => {
            let (current, total) = quiz.progress();
            writeln!(out, "Word {} of {}", current, total)?;

            if let Some(feedback) = quiz.feedback() {
                render_feedback(feedback, out)?;
            }

            if quiz.awaiting_advance() {
                writeln!(out, "Type :n for the next word.")?;
            } else {
                writeln!(out, "Type :p to hear the word, then type your spelling.")?;
            }
        }
        QuizPhase::Complete => {
            writeln!(out, "That was the last word - quiz complete!")?;
            writeln!(out, "Type :r to start over, or :q to quit.")?;
        }
    }

    Ok(())
}

fn render_feedback(feedback: &Feedback, out: &mut impl Write) -> io::Result<()> {
    match feedback {
        Feedback::Correct => writeln!(out, "✓ Correct!"),
        Feedback::Incorrect { expected } => {
            writeln!(out, "✗ Not quite - the word was \"{}\".", expected)
        }
    }
}

/// Render a failed action
///
/// Transient backend errors are one-shot; configuration errors get an
/// extra pointer since they persist until fixed.
pub fn render_action_error(err: &SpellError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "✗ {}", err)?;
    if err.is_configuration() {
        writeln!(out, "  (playback stays unavailable until this is fixed)")?;
    }
    Ok(())
}

/// Render the command reference
pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  :p, :play     hear the current word")?;
    writeln!(out, "  <spelling>    submit your answer")?;
    writeln!(out, "  :n, :next     move to the next word")?;
    writeln!(out, "  :r, :restart  start over (after the last word)")?;
    writeln!(out, "  :h, :help     show this help")?;
    writeln!(out, "  :q, :quit     leave the quiz")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordList;

    fn quiz(words: &[&str]) -> Quiz {
        Quiz::new(WordList::new(words.iter().copied()).unwrap())
    }

    fn render_to_string(quiz: &Quiz, warning: Option<&str>) -> String {
        let mut buf = Vec::new();
        render(quiz, warning, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(":p"), Some(Command::Play));
        assert_eq!(Command::parse(" :play "), Some(Command::Play));
        assert_eq!(Command::parse(":N"), Some(Command::Next));
        assert_eq!(Command::parse(":restart"), Some(Command::Restart));
        assert_eq!(Command::parse(":q"), Some(Command::Quit));
        assert_eq!(
            Command::parse(":bogus"),
            Some(Command::Unknown("bogus".to_string()))
        );
    }

    #[test]
    fn test_parse_submissions_and_blanks() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
        assert_eq!(
            Command::parse("basil "),
            Some(Command::Submit("basil ".to_string()))
        );
    }

    #[test]
    fn test_render_in_progress() {
        let quiz = quiz(&["spray", "basil"]);
        let output = render_to_string(&quiz, None);
        assert!(output.contains("Word 1 of 2"));
        assert!(output.contains(":p"));
    }

    #[test]
    fn test_render_feedback_reveals_spelling() {
        let mut quiz = quiz(&["basil"]);
        quiz.submit("basilx");
        let output = render_to_string(&quiz, None);
        assert!(output.contains("basil"));
        assert!(output.contains(":n"));
    }

    #[test]
    fn test_render_complete() {
        let mut quiz = quiz(&["basil"]);
        quiz.submit("basil");
        quiz.next();
        let output = render_to_string(&quiz, None);
        assert!(output.contains("quiz complete"));
        assert!(output.contains(":r"));
    }

    #[test]
    fn test_render_persistent_warning() {
        let quiz = quiz(&["basil"]);
        let output = render_to_string(&quiz, Some("No API key configured"));
        assert!(output.contains("⚠ No API key configured"));
    }

    #[test]
    fn test_render_action_error_marks_configuration() {
        let mut buf = Vec::new();
        let err = SpellError::MissingCredential("no key".to_string());
        render_action_error(&err, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("stays unavailable"));

        let mut buf = Vec::new();
        let err = SpellError::Backend("timeout".to_string());
        render_action_error(&err, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(!output.contains("stays unavailable"));
    }
}
