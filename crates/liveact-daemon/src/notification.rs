//! Plain-data rendering of a content state into notification text.

use serde::{Deserialize, Serialize};

use liveact_core::{BrewPhase, ContentState, OrderStatus};

/// What gets posted to the notification platform for a live activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNotification {
    pub title: String,
    pub body: String,
}

pub fn render(state: &ContentState) -> RenderedNotification {
    match state {
        ContentState::CoffeeBrewer(state) => {
            let body = match state.phase {
                BrewPhase::Grinding => {
                    format!("Grinding the beans, ready in {} min.", state.remaining)
                }
                BrewPhase::Brewing => {
                    format!("Brewing, ready in {} min.", state.remaining)
                }
                BrewPhase::Served => "Your coffee is served. Enjoy!".to_string(),
            };
            RenderedNotification {
                title: "Coffee brewer".to_string(),
                body,
            }
        }
        ContentState::Order(state) => {
            let body = match state.status {
                OrderStatus::Preparing => "We are preparing your order.".to_string(),
                OrderStatus::Shipped => "Your order is on its way.".to_string(),
                OrderStatus::Delivered => "Your order was delivered.".to_string(),
            };
            RenderedNotification {
                title: "Order status".to_string(),
                body,
            }
        }
    }
}
