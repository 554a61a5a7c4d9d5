//! Routescope - path discovery over component graphs.
//!
//! This crate provides both a CLI application and a library for enumerating
//! the simple paths between two components of an architecture graph,
//! filtering them with security predicates and projecting the survivors into
//! a deduplicated subgraph.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filters;
pub mod finder;
pub mod projector;
pub mod store;

// Application context and CLI (needed by binary)
pub mod app;
pub mod cli;
pub mod output;
