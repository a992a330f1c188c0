//! Loan accounts: domain types, storage abstraction and the lifecycle service.

pub mod domain;
pub mod memory;
pub mod number;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::{LoanDefaults, LoanService};
