//! Case progress: a parent row per engagement plus an append-only detail log.
//!
//! Layered like the other resources: `domain` holds the inputs, `repository`
//! the data access, `service` validation and orchestration.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CaseProgressService;
