//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Handlers deserialize the shared DTOs, map them into domain commands, call
//! a service and map the result back. Domain errors are translated into HTTP
//! status codes with a JSON `{"error": ...}` body.

pub mod rest;
