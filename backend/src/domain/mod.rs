//! # Domain Module
//!
//! Business logic for the contribution tracker.
//!
//! A project is a pooled fund with a target amount and a payment plan. Each
//! contributor added to a project owes their contribution amount on every
//! date the plan produces; those obligations are stored as payment schedule
//! rows and settled one by one as payments come in.
//!
//! ## Module Organization
//!
//! - **schedule**: the payment schedule generator (pure, synchronous)
//! - **calendar**: date helpers the generator and the services share
//! - **validation**: field rules for incoming commands
//! - **project_service**: project CRUD and progress totals
//! - **contributor_service**: enrolling contributors and generating their schedules
//! - **payment_service**: recording payments against schedule rows
//! - **insights_service**: the per-project overview (filters, sorting, statistics)
//!
//! ## Business Rules
//!
//! - The schedule-defining fields of a project never change after creation
//! - A contributor's schedule rows are exactly the generator output for the project
//! - Contributors are enrolled in one all-or-nothing transaction per batch
//! - Projects are only visible to the owner that created them

pub mod calendar;
pub mod commands;
pub mod contributor_service;
pub mod errors;
pub mod insights_service;
pub mod models;
pub mod payment_service;
pub mod project_service;
pub mod schedule;
pub mod validation;

pub use contributor_service::ContributorService;
pub use errors::{DomainError, DomainResult, ScheduleError, ValidationError};
pub use insights_service::InsightsService;
pub use payment_service::PaymentService;
pub use project_service::ProjectService;
