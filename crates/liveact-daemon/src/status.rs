//! One-shot formatting of the current live activity records for the CLI.

use liveact_core::{ActivityKind, BrewPhase, ContentState, OrderStatus};

pub fn format_status(records: &[(ActivityKind, Option<ContentState>)]) -> String {
    let mut out = String::new();
    for (kind, state) in records {
        let description = match state {
            Some(state) => describe(state),
            None => "-".to_string(),
        };
        out.push_str(&format!("{:<14} {}\n", kind.identifier(), description));
    }
    out
}

fn describe(state: &ContentState) -> String {
    match state {
        ContentState::CoffeeBrewer(state) => match state.phase {
            BrewPhase::Grinding => format!("grinding ({} min remaining)", state.remaining),
            BrewPhase::Brewing => format!("brewing ({} min remaining)", state.remaining),
            BrewPhase::Served => "served".to_string(),
        },
        ContentState::Order(state) => match state.status {
            OrderStatus::Preparing => "preparing".to_string(),
            OrderStatus::Shipped => "shipped".to_string(),
            OrderStatus::Delivered => "delivered".to_string(),
        },
    }
}
