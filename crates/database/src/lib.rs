//! # Confab Database Crate
//!
//! This crate acts as the application-specific interface to the SQLite store
//! that holds the conference schedule.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The web layer only sees entities,
//!   projections and `Option` for "not found".
//! - **Explicit traversal:** Relationships (event → sessions, session ↔ speakers,
//!   speaker → bio) are repository methods that each issue a single query.
//!   The handler-facing reads join what they need up front, so no per-row
//!   follow-up queries are issued.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a shared
//!   `SqlitePool` that the caller constructs and injects.
//!
//! ## Public API
//!
//! - `connect` / `connect_in_memory`: build the connection pool.
//! - `run_migrations`: apply the embedded schema migrations.
//! - `DbRepository`: lookups and relationship traversals.
//! - `DbError`: the error type returned by this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_in_memory, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
