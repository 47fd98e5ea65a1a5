pub mod bootstrap;
pub mod connection;
pub mod job_repository;
pub mod models;
