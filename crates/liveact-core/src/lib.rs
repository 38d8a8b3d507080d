//! Pure types and logic for live-activity synchronization.
//! Async implementations live in liveact-daemon.

pub mod dismissal;
pub mod error;
pub mod event;
pub mod types;

pub use error::DecodeError;
pub use event::PushEvent;
pub use types::{
    ActivityKind, BrewPhase, CoffeeBrewerContentState, ContentState, OrderContentState,
    OrderStatus,
};
