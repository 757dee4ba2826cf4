pub mod config;
pub mod downtime;
pub mod fetch;
pub mod infra;
pub mod model;
pub mod output;
pub mod report;
pub mod services;
