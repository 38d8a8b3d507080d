use serde_json::Value;

use crate::error::DecodeError;

use super::{ActivityKind, CoffeeBrewerContentState, OrderContentState};

/// The latest known content of a live activity, typed per kind.
///
/// Absence of a state (the record being null) is expressed as
/// `Option<ContentState>` everywhere; a `ContentState` value always
/// describes an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    CoffeeBrewer(CoffeeBrewerContentState),
    Order(OrderContentState),
}

impl ContentState {
    pub fn kind(&self) -> ActivityKind {
        match self {
            ContentState::CoffeeBrewer(_) => ActivityKind::CoffeeBrewer,
            ContentState::Order(_) => ActivityKind::OrderStatus,
        }
    }

    /// Decode a raw update payload into the content state matching `kind`.
    pub fn decode(kind: ActivityKind, payload: Value) -> Result<Self, DecodeError> {
        let malformed = |source| DecodeError::MalformedContent { kind, source };
        match kind {
            ActivityKind::CoffeeBrewer => serde_json::from_value(payload)
                .map(ContentState::CoffeeBrewer)
                .map_err(malformed),
            ActivityKind::OrderStatus => serde_json::from_value(payload)
                .map(ContentState::Order)
                .map_err(malformed),
        }
    }

    /// The wire/storage representation of the content, without the kind.
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            ContentState::CoffeeBrewer(state) => serde_json::to_value(state),
            ContentState::Order(state) => serde_json::to_value(state),
        }
    }
}
