use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Which side of the conversation a segment belongs to.
///
/// The chat UI draws user and assistant bubbles differently, so a failed
/// expression needs a different highlight on each to stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ColorScheme {
    User,
    #[default]
    Assistant,
}

/// Colors of the marker drawn around an expression that failed to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Palette {
    pub foreground: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

impl ColorScheme {
    pub const USER_PALETTE: Palette = Palette {
        foreground: "#fee2e2",
        background: "#7f1d1d",
        border: "#fca5a5",
    };

    pub const ASSISTANT_PALETTE: Palette = Palette {
        foreground: "#b91c1c",
        background: "#fef2f2",
        border: "#fecaca",
    };

    pub fn palette(self) -> Palette {
        match self {
            ColorScheme::User => Self::USER_PALETTE,
            ColorScheme::Assistant => Self::ASSISTANT_PALETTE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::User => "user",
            ColorScheme::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme {0:?}, expected \"user\" or \"assistant\"")]
pub struct ParseColorSchemeError(pub String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(ColorScheme::User),
            "assistant" => Ok(ColorScheme::Assistant),
            _ => Err(ParseColorSchemeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_per_scheme() {
        assert_ne!(ColorScheme::User.palette(), ColorScheme::Assistant.palette());
        assert_eq!(ColorScheme::default(), ColorScheme::Assistant);
    }

    #[test]
    fn parse_round_trips_display() {
        for scheme in [ColorScheme::User, ColorScheme::Assistant] {
            assert_eq!(scheme.to_string().parse::<ColorScheme>(), Ok(scheme));
        }
        assert_eq!(" User ".parse::<ColorScheme>(), Ok(ColorScheme::User));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "system".parse::<ColorScheme>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown color scheme \"system\", expected \"user\" or \"assistant\""
        );
    }
}
