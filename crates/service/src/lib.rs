//! Service layer providing business-oriented operations on top of models.
//! - Repositories own data access; their free functions accept any connection
//!   or transaction.
//! - Services validate input and translate "no row" into `NotFound`.
//! - Upload rules live here so they can be tested without HTTP.

pub mod errors;
pub mod pagination;
pub mod geo;
pub mod upload;
pub mod runtime;
pub mod case_progress;
pub mod merchant;
pub mod lawyer;
#[cfg(test)]
pub mod test_support;
