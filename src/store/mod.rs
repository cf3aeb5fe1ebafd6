//! Postgres reads and writes, one module per record type.

pub mod posts;
pub mod users;
