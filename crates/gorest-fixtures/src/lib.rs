//! Test fixtures for the GoRest user API
//!
//! - [`HeaderProvider`]: authenticated and public header sets
//! - [`PayloadBuilder`]: randomized create/update bodies
//! - [`model`]: the user resource as sent and received

pub mod headers;
pub mod model;
pub mod payloads;

pub use headers::HeaderProvider;
pub use model::{Gender, NewUser, User, UserStatus, UserUpdate};
pub use payloads::PayloadBuilder;
