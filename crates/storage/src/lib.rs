#![forbid(unsafe_code)]

pub mod query_log;
pub mod repository;
pub mod sqlite;
