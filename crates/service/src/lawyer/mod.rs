//! Lawyer profiles: public directory reads plus owner-scoped writes.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::LawyerService;
