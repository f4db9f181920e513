/// Schema and CRUD round trips against the migrated tables
pub mod schema_tests;

/// Transaction handling and foreign key behaviour
pub mod transaction_tests;
