//! Domain models for the note bot.
//!
//! # Core Concepts
//!
//! ## Persistent Entities
//!
//! - [`Note`]: A short text item owned by exactly one [`OwnerId`]. Notes are
//!   immutable once stored and only leave the store through an explicit delete.
//!
//! ## Ephemeral Entities
//!
//! These live only for the lifetime of the process:
//!
//! - [`Mode`]: The conversation step an owner is currently in.
//! - [`Reply`]: The outbound payload produced by one turn.
//! - [`Command`]: A parsed slash command from inbound text.

mod command;
mod mode;
mod note;
mod owner;
mod reply;

pub use command::*;
pub use mode::*;
pub use note::*;
pub use owner::*;
pub use reply::*;
