use std::fmt;

use serde::{Deserialize, Serialize};

/// The live-activity kinds this application knows about.
///
/// The string identifier doubles as the notification tag and as the
/// registration key on the remote push backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    CoffeeBrewer,
    OrderStatus,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 2] = [ActivityKind::CoffeeBrewer, ActivityKind::OrderStatus];

    pub fn identifier(&self) -> &'static str {
        match self {
            ActivityKind::CoffeeBrewer => "coffee-brewer",
            ActivityKind::OrderStatus => "order-status",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.identifier() == identifier)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
