//! Domains module containing business logic organized by bounded contexts.
//!
//! Housecall Pro operations live under `tools`; the server publishes no
//! resources or prompts.

pub mod tools;
