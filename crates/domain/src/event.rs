//! Competition event types.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The events a team can compete in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    PosterPresentation,
    PaperPresentation,
    StartupExpo,
}

impl EventType {
    /// Every event, in the order they are listed on leaderboards.
    pub const ALL: [EventType; 3] = [
        Self::PosterPresentation,
        Self::PaperPresentation,
        Self::StartupExpo,
    ];

    pub fn all() -> &'static [EventType] {
        &Self::ALL
    }

    /// Wire identifier, e.g. `paper-presentation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PosterPresentation => "poster-presentation",
            Self::PaperPresentation => "paper-presentation",
            Self::StartupExpo => "startup-expo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PosterPresentation => "Poster Presentation",
            Self::PaperPresentation => "Paper Presentation",
            Self::StartupExpo => "Startup Expo",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}
