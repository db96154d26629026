//! Service layer for the table state record.
//! - Separates business logic from data access.
//! - Reuses the entity definition and queries in the `models` crate.

pub mod errors;
pub mod runtime;
pub mod table_state;
pub mod test_support;
