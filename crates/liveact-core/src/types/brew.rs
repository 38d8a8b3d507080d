use serde::{Deserialize, Serialize};

/// Phase of a brewing session. Strictly forward-moving:
/// Grinding -> Brewing -> Served.
///
/// Wire casing matches the server payload (`"GRINDING"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrewPhase {
    Grinding,
    Brewing,
    Served,
}

impl BrewPhase {
    /// The next phase in the sequence, or None once served.
    pub fn next(self) -> Option<BrewPhase> {
        match self {
            BrewPhase::Grinding => Some(BrewPhase::Brewing),
            BrewPhase::Brewing => Some(BrewPhase::Served),
            BrewPhase::Served => None,
        }
    }
}

/// Content state for the coffee brewer live activity.
/// `remaining` is a countdown (minutes) toward the coffee being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeBrewerContentState {
    #[serde(rename = "state")]
    pub phase: BrewPhase,
    pub remaining: u32,
}
