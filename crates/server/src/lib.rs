pub mod state;
pub mod response;
pub mod errors;
pub mod auth;
pub mod routes;
pub mod openapi;
pub mod startup;

pub use startup::run;
