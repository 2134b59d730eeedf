//! Relay homework review status changes from the Practicum API to a Telegram chat.
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod poller;
pub mod response;
pub mod status;
