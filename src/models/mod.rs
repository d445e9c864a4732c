//! Domain models for mbird.
//!
//! # Core Concepts
//!
//! - [`MbirdNode`]: one element of a project tree. Nodes own their children,
//!   carry a staleness flag, and are validated for id cycles whenever they are
//!   built from children or parsed from untrusted data.
//! - Request and response bodies for the HTTP API ([`TreeResponse`],
//!   [`SaveResponse`], ...).

mod node;
mod responses;
pub(crate) mod validator;

pub use node::*;
pub use responses::*;
