//! Input frontends for pathlight
//!
//! This module contains implementations of the [`Frontend`](crate::Frontend)
//! trait for the input formats the engine accepts.

pub mod estree;
pub mod script;

pub use estree::EstreeFrontend;
pub use script::ScriptFrontend;
