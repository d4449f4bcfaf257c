//! Typed Tatsu API payloads and the identifiers that address them.

pub mod guild;
pub mod id;
pub mod kind;
pub mod store;
pub mod user;

pub use guild::*;
pub use id::*;
pub use kind::*;
pub use store::*;
pub use user::*;
