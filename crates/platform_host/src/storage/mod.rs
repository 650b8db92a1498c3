//! Storage contracts exposed to window content providers.

pub mod documents;
