//! Input scripts for headless runs.
//!
//! A script is a whitespace- or comma-separated list of steps:
//! `+key` presses a key, `-key` releases it and a bare number advances that
//! many frames. `"+d 10 -d 20"` holds D for ten frames then idles for twenty.

use rollcube_input::InputEvent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script is empty")]
    Empty,
    #[error("step {index}: missing key name after {sign:?}")]
    MissingKey { index: usize, sign: char },
    #[error("step {index}: expected +key, -key or a frame count, got {token:?}")]
    BadStep { index: usize, token: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Input(InputEvent),
    Frames(u32),
}

pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    let tokens: Vec<&str> = script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(ScriptError::Empty);
    }

    tokens
        .into_iter()
        .enumerate()
        .map(|(index, token)| parse_step(index, token))
        .collect()
}

fn parse_step(index: usize, token: &str) -> Result<Step, ScriptError> {
    let mut chars = token.chars();
    match chars.next() {
        Some(sign @ ('+' | '-')) => {
            let key = chars.as_str();
            if key.is_empty() {
                return Err(ScriptError::MissingKey { index, sign });
            }
            let event = if sign == '+' {
                InputEvent::KeyDown(key.to_string())
            } else {
                InputEvent::KeyUp(key.to_string())
            };
            Ok(Step::Input(event))
        }
        _ => token
            .parse::<u32>()
            .map(Step::Frames)
            .map_err(|_| ScriptError::BadStep {
                index,
                token: token.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_steps() {
        let steps = parse("+d 4 -d, 2").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Input(InputEvent::KeyDown("d".into())),
                Step::Frames(4),
                Step::Input(InputEvent::KeyUp("d".into())),
                Step::Frames(2),
            ]
        );
    }

    #[test]
    fn key_names_keep_case() {
        let steps = parse("+ArrowUp").unwrap();
        assert_eq!(steps, vec![Step::Input(InputEvent::KeyDown("ArrowUp".into()))]);
    }

    #[test]
    fn empty_script_rejected() {
        assert_eq!(parse("  , "), Err(ScriptError::Empty));
    }

    #[test]
    fn bare_sign_rejected() {
        assert_eq!(
            parse("+w -"),
            Err(ScriptError::MissingKey { index: 1, sign: '-' })
        );
    }

    #[test]
    fn garbage_rejected() {
        let err = parse("+w ten").unwrap_err();
        assert_eq!(
            err,
            ScriptError::BadStep {
                index: 1,
                token: "ten".into()
            }
        );
        assert!(err.to_string().contains("step 1"));
    }
}
