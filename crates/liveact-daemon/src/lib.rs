//! Async runtime for live-activity synchronization: the content state store,
//! the controller keeping notification/store/remote-registration consistent,
//! the push event receiver, and the scheduled dismissal worker.

pub mod analytics;
pub mod controller;
pub mod dismissal;
pub mod error;
pub mod id;
pub mod notification;
pub mod platform;
pub mod receiver;
pub mod remote;
pub mod source;
pub mod status;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;
