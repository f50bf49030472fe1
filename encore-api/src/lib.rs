//! A barebones client for the karaoke recommendation backend.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod recommend;
pub use recommend::*;

mod request;
