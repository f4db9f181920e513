//! Merchant listings with a great-circle "nearby" search.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::MerchantService;
