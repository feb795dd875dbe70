// Sift: client library for a hosted content-moderation service.
//
// The service exposes a JSON-over-HTTP API for profanity filtering,
// moderation queueing, content flagging, user registration, and
// application (tenant) management. This crate wraps that API behind a
// single facade, normalizes its two failure shapes into one error type,
// and optionally defers the write-heavy operations to an external work
// queue instead of calling the service inline.

pub mod client;
pub mod config;
pub mod error;
pub mod queue;
pub mod store;
pub mod transport;

pub use client::ModerationClient;
pub use config::{ClientConfig, JobPriority, QueueOptions};
pub use error::{ClientError, Result};
