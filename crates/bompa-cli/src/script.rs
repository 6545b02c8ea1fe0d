//! Timed intent scripts for headless runs.
//!
//! One intent per line: `<seconds> <intent>`. `#` starts a comment.
//!
//! ```text
//! # hold the left door once he gets close
//! 4.0   camera
//! 4.5   feed next
//! 6.0   camera
//! 6.5   close left
//! 30    light right on
//! ```

use bompa_core::{DoorSide, PlayerIntent};

/// An intent to queue once the session clock reaches `at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedIntent {
    pub at: f64,
    pub intent: PlayerIntent,
    pub line: usize,
}

/// Parse a whole script, ordered by time. Lines with equal times keep file order.
pub fn parse(source: &str) -> Result<Vec<ScriptedIntent>, String> {
    let mut entries = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let entry = parse_line(text).map_err(|e| format!("script line {line}: {e}"))?;
        entries.push(ScriptedIntent {
            at: entry.0,
            intent: entry.1,
            line,
        });
    }
    entries.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(entries)
}

fn parse_line(text: &str) -> Result<(f64, PlayerIntent), String> {
    let mut words = text.split_whitespace();
    let time = words.next().ok_or("missing time")?;
    let at: f64 = time
        .parse()
        .map_err(|_| format!("'{time}' is not a time in seconds"))?;
    if !at.is_finite() || at < 0.0 {
        return Err(format!("time must be a non-negative number, got {time}"));
    }

    let verb = words.next().ok_or("missing intent after time")?;
    let args: Vec<&str> = words.collect();
    let intent = parse_intent(verb, &args)?;
    Ok((at, intent))
}

fn parse_intent(verb: &str, args: &[&str]) -> Result<PlayerIntent, String> {
    let intent = match (verb.to_ascii_lowercase().as_str(), args) {
        ("toggle", [side]) => PlayerIntent::ToggleDoor {
            side: parse_side(side)?,
        },
        ("close", [side]) => PlayerIntent::SetDoor {
            side: parse_side(side)?,
            closed: true,
        },
        ("open", [side]) => PlayerIntent::SetDoor {
            side: parse_side(side)?,
            closed: false,
        },
        ("light", [side, state]) => PlayerIntent::SetDoorLight {
            side: parse_side(side)?,
            on: match state.to_ascii_lowercase().as_str() {
                "on" => true,
                "off" => false,
                other => return Err(format!("light state must be 'on' or 'off', got '{other}'")),
            },
        },
        ("camera", []) => PlayerIntent::ToggleCamera,
        ("feed", [target]) => match target.to_ascii_lowercase().as_str() {
            "next" => PlayerIntent::NextFeed,
            "prev" | "previous" => PlayerIntent::PreviousFeed,
            index => PlayerIntent::SelectFeed {
                feed: index
                    .parse()
                    .map_err(|_| format!("feed must be 'next', 'prev' or an index, got '{index}'"))?,
            },
        },
        ("toggle" | "close" | "open" | "light" | "camera" | "feed", _) => {
            return Err(format!("wrong number of arguments for '{verb}'"));
        }
        _ => return Err(format!("unknown intent '{verb}'")),
    };
    Ok(intent)
}

fn parse_side(word: &str) -> Result<DoorSide, String> {
    word.parse().map_err(|e: bompa_core::BompaError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_intent() {
        let script = parse(
            "0 toggle left\n\
             1 close right\n\
             2 open left\n\
             3 light right on\n\
             4 camera\n\
             5 feed next\n\
             6 feed prev\n\
             7 feed 3\n",
        )
        .unwrap();
        let intents: Vec<_> = script.iter().map(|s| s.intent).collect();
        assert_eq!(
            intents,
            vec![
                PlayerIntent::ToggleDoor {
                    side: DoorSide::Left
                },
                PlayerIntent::SetDoor {
                    side: DoorSide::Right,
                    closed: true
                },
                PlayerIntent::SetDoor {
                    side: DoorSide::Left,
                    closed: false
                },
                PlayerIntent::SetDoorLight {
                    side: DoorSide::Right,
                    on: true
                },
                PlayerIntent::ToggleCamera,
                PlayerIntent::NextFeed,
                PlayerIntent::PreviousFeed,
                PlayerIntent::SelectFeed { feed: 3 },
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let script = parse("# header\n\n  \n2.5 camera # look around\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].line, 4);
        assert!((script[0].at - 2.5).abs() < 1e-12);
    }

    #[test]
    fn sorts_by_time_keeping_file_order_for_ties() {
        let script = parse("5 camera\n1 close left\n1 close right\n").unwrap();
        let lines: Vec<_> = script.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 1]);
    }

    #[test]
    fn errors_name_the_line() {
        let err = parse("1 camera\n2 close middle\n").unwrap_err();
        assert!(err.starts_with("script line 2:"), "{err}");
        assert!(err.contains("middle"), "{err}");
    }

    #[test]
    fn rejects_bad_times() {
        assert!(parse("soon camera").is_err());
        assert!(parse("-1 camera").is_err());
        assert!(parse("inf camera").is_err());
    }

    #[test]
    fn rejects_malformed_intents() {
        assert!(parse("1 dance").is_err());
        assert!(parse("1 toggle").is_err());
        assert!(parse("1 light left dim").is_err());
        assert!(parse("1 feed sideways").is_err());
        assert!(parse("1 camera now").is_err());
        assert!(parse("1").is_err());
    }
}
