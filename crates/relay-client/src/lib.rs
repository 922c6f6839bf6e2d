//! # relay-client
//!
//! Client-side facade over the message relay: probes candidate base URLs,
//! keeps a disposable cache of the listing, tracks a healthy/unhealthy
//! status, and notifies subscribers on every outcome. A file-backed
//! fallback store covers the no-backend case.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;

pub use client::{ChatClient, ChatStatus, OutgoingMessage, Subscription};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use identity::Identity;
pub use store::LocalMessageStore;
