//! # TaskDeck Shared Library
//!
//! This crate contains the domain core of the TaskDeck backend: the data
//! models, the generic repository/service framework every entity plugs
//! into, and the service-locator container that wires the domain services
//! together at startup.
//!
//! ## Module Organization
//!
//! - `models`: Domain records, input payloads, and output projections
//! - `storage`: Storage-engine contract and the in-process table engine
//! - `query`: Filter descriptors, ordering, and pagination
//! - `repository`: Entity-agnostic CRUD over a storage backend
//! - `registry`: Service-locator container and lazy service handles
//! - `services`: Generic CRUD service and the concrete domain services
//! - `auth`: Password hashing and token issuance collaborators
//! - `error`: Common error taxonomy

pub mod auth;
pub mod error;
pub mod models;
pub mod query;
pub mod registry;
pub mod repository;
pub mod services;
pub mod storage;

/// Current version of the TaskDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
