//! skein IR - token and parse-tree types.
//!
//! This crate contains the data shared by every stage of the engine:
//! - [`Token`] and [`Position`]: one lexical unit and where it starts
//! - [`Node`] and [`Payload`]: the labeled parse tree produced by rules
//!
//! # Design Philosophy
//!
//! - **Plain values**: tokens and nodes are owned, immutable once built, and
//!   never shared. A node owns its children outright.
//! - **Total order for diagnostics**: [`Position`] orders tokens by line then
//!   column. The engine only uses it to rank failures by how far they got.

mod node;
mod token;

pub use node::{Node, Payload};
pub use token::{Position, Token, END_OF_STREAM_KIND};
