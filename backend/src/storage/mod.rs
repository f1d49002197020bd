//! # Storage Module
//!
//! Persistence for projects, contributors and their payment schedules.
//!
//! Everything lives in one SQLite database accessed through SQLx. The
//! [`DbConnection`] owns the pool and creates the schema on startup; each
//! repository wraps the queries for one table and maps rows into domain
//! models by hand.
//!
//! ## Tables
//!
//! - `projects`: one row per fund, scoped by `owner_id`
//! - `contributors`: members of a project, deleted with it
//! - `payment_schedules`: one row per contributor per due date, deleted with
//!   either parent
//!
//! Foreign keys are switched on for every pooled connection so the
//! `ON DELETE CASCADE` clauses take effect.

pub mod connection;
pub mod repositories;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{ContributorRepository, PaymentScheduleRepository, ProjectRepository};
