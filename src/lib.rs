//! CSS Intel Library
//!
//! Hover intelligence for CSS and SCSS documents: color previews for color
//! literals, cross-references for custom property usages and reference
//! documentation for property names, served over the Language Server
//! Protocol.

pub mod config;
pub mod css;
pub mod error;
pub mod language;
pub mod logging;
pub mod lookup;
pub mod server;
#[cfg(test)]
pub(crate) mod test_utils;
