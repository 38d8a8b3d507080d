mod activity;
mod brew;
mod content;
mod order;

pub use activity::ActivityKind;
pub use brew::{BrewPhase, CoffeeBrewerContentState};
pub use content::ContentState;
pub use order::{OrderContentState, OrderStatus};
