pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod filesystem;
pub mod models;
pub mod session;
pub mod tree_render;

pub use error::{Error, ErrorKind, Result};
