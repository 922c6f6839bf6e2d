//! Request extractors

mod client_ip;
mod reaction;

pub use client_ip::ClientIp;
pub use reaction::ReactionParams;
