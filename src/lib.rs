//! wisdom - a read-only REST API for quotes, their authors and tags
//!
//! Requests map onto a handful of fixed queries against a relational store.
//! Rows are assembled into nested JSON entities and written either as a bare
//! JSON document or, for legacy browser clients, wrapped as JSONP.

pub mod assembler;
pub mod config;
pub mod errors;
pub mod http_server;
pub mod model;
pub mod store;
pub mod telemetry;
