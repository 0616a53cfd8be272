pub mod client;
pub mod document;

pub use client::SessionClient;
pub use document::{Document, Object, Property};
