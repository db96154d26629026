pub mod errors;
pub mod db;
pub mod table_state;
