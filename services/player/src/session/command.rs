//! services/player/src/session/command.rs
//!
//! The text command protocol typed at the terminal. Every keyboard binding of the
//! player also has a word form, so `k`, `space` and `play` all toggle playback.
//! Course, lesson and chapter numbers are typed 1-based and stored 0-based.

use course_player_core::Key;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(Key),
    /// Pauses if playing. Unlike the play key it never starts playback.
    Pause,
    Next,
    Previous,
    Select { course_index: usize, lesson_index: usize },
    Seek(f64),
    Chapter(usize),
    AddNote(String),
    Notes,
    DeleteNote(Uuid),
    Courses,
    Resources,
    Transcript,
    Status,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a time. Use seconds or m:ss.")]
    BadTime(String),
    #[error("'{0}' is not a note id.")]
    BadNoteId(String),
}

pub const HELP: &str = "\
Playback:   play | space | k      toggle play/pause
            pause                 pause
            left | right          skip -/+10s
            up | down             volume -/+0.1
            mute | m              toggle mute
            fullscreen | f        toggle fullscreen
            captions | c          toggle captions
            faster | > | .        speed +0.25 (while playing)
            slower | < | ,        speed -0.25 (while playing)
Navigation: next | prev | select COURSE LESSON
            seek TIME (seconds or m:ss) | chapter N
Notes:      note TEXT | notes | delnote ID
Views:      status | courses | resources | transcript | help | quit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    // A lone space is trimmed away above, so it is matched on the word "space".
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "play" | "space" | "k" => Command::Key(Key::Char(' ')),
        "pause" => Command::Pause,
        "left" => Command::Key(Key::Left),
        "right" => Command::Key(Key::Right),
        "up" => Command::Key(Key::Up),
        "down" => Command::Key(Key::Down),
        "mute" | "m" => Command::Key(Key::Char('m')),
        "fullscreen" | "f" => Command::Key(Key::Char('f')),
        "captions" | "c" => Command::Key(Key::Char('c')),
        "faster" | ">" | "." => Command::Key(Key::Char('>')),
        "slower" | "<" | "," => Command::Key(Key::Char('<')),
        digit if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
            Command::Key(Key::Char(digit.as_bytes()[0] as char))
        }
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "select" => {
            const USAGE: &str = "select COURSE LESSON";
            let mut numbers = rest.split_whitespace().map(parse_ordinal);
            match (numbers.next(), numbers.next(), numbers.next()) {
                (Some(Some(course_index)), Some(Some(lesson_index)), None) => Command::Select {
                    course_index,
                    lesson_index,
                },
                _ => return Err(CommandError::Usage(USAGE)),
            }
        }
        "seek" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("seek TIME"));
            }
            Command::Seek(parse_time(rest)?)
        }
        "chapter" => match parse_ordinal(rest) {
            Some(index) => Command::Chapter(index),
            None => return Err(CommandError::Usage("chapter N")),
        },
        "note" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("note TEXT"));
            }
            Command::AddNote(rest.to_string())
        }
        "notes" => Command::Notes,
        "delnote" => match Uuid::parse_str(rest) {
            Ok(id) => Command::DeleteNote(id),
            Err(_) if rest.is_empty() => return Err(CommandError::Usage("delnote ID")),
            Err(_) => return Err(CommandError::BadNoteId(rest.to_string())),
        },
        "courses" => Command::Courses,
        "resources" => Command::Resources,
        "transcript" => Command::Transcript,
        "status" | "s" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Turns a 1-based number into a 0-based index.
fn parse_ordinal(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Accepts `90`, `90.5` or `1:30`.
pub fn parse_time(text: &str) -> Result<f64, CommandError> {
    let bad = || CommandError::BadTime(text.to_string());
    let seconds = match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.parse::<u32>().map_err(|_| bad())?;
            let seconds = seconds.parse::<f64>().map_err(|_| bad())?;
            if !(0.0..60.0).contains(&seconds) {
                return Err(bad());
            }
            f64::from(minutes) * 60.0 + seconds
        }
        None => text.parse::<f64>().map_err(|_| bad())?,
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(bad());
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn key_words_and_letters_agree() {
        assert_eq!(parse("k"), parse("play"));
        assert_eq!(parse("m"), parse("mute"));
        assert_eq!(parse("."), parse("faster"));
        assert_eq!(parse(","), parse("slower"));
        assert_eq!(parse("left"), Ok(Some(Command::Key(Key::Left))));
        assert_eq!(parse("7"), Ok(Some(Command::Key(Key::Char('7')))));
    }

    #[test]
    fn pause_is_not_a_toggle() {
        assert_eq!(parse("pause"), Ok(Some(Command::Pause)));
        assert_ne!(parse("pause"), parse("play"));
    }

    #[test]
    fn select_takes_one_based_numbers() {
        assert_eq!(
            parse("select 2 3"),
            Ok(Some(Command::Select {
                course_index: 1,
                lesson_index: 2
            }))
        );
        assert!(matches!(parse("select 0 1"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("select 1"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn seek_accepts_seconds_and_minutes() {
        assert_eq!(parse("seek 90"), Ok(Some(Command::Seek(90.0))));
        assert_eq!(parse("seek 2:05"), Ok(Some(Command::Seek(125.0))));
        assert!(matches!(parse("seek 1:75"), Err(CommandError::BadTime(_))));
        assert!(matches!(parse("seek soon"), Err(CommandError::BadTime(_))));
        assert!(matches!(parse("seek -3"), Err(CommandError::BadTime(_))));
    }

    #[test]
    fn note_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("note  closures capture   scope "),
            Ok(Some(Command::AddNote("closures capture   scope".to_string())))
        );
        assert!(matches!(parse("note"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn delnote_needs_a_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(
            parse(&format!("delnote {id}")),
            Ok(Some(Command::DeleteNote(id)))
        );
        assert!(matches!(parse("delnote 12"), Err(CommandError::BadNoteId(_))));
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(
            parse("rewind"),
            Err(CommandError::Unknown("rewind".to_string()))
        );
    }
}
