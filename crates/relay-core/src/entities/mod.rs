//! Domain entities

mod message;
mod reaction;

pub use message::{Message, MessageDraft, MessageKind};
pub use reaction::{ReactionCounts, ReactionKind, ReactionKindParseError};
