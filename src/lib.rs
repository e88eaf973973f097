pub mod advisor;
pub mod config;
pub mod error;
pub mod household;
pub mod tips;
