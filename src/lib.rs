//! citerag: multi-tenant question answering over uploaded documents
//!
//! A question from a client is answered only from that client's documents:
//! passages are retrieved from the client's partition of an external
//! retrieval service, numbered into a grounded prompt for a language model,
//! and returned together with citations matching the `[n]` markers in the
//! answer.

pub mod api;
pub mod cli;
pub mod config;
pub mod documents;
pub mod errors;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod retrieval;
pub mod retry;
pub mod tenant;
pub mod webhook;

#[cfg(test)]
mod config_tests;

pub use config::AppConfig;
pub use errors::*;
