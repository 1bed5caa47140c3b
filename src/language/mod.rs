///! This module includes common things we can reuse across different languages

pub mod document;
pub mod repository_uri;
pub mod tree_utils;
