//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Turn repository calls into the page contexts and booking actions the
//!   HTTP and CLI layers need.
//! - Keep those layers unaware of SQL.

pub mod flight_service;
