pub mod status_api;

pub use status_api::{StatusApi, StatusSnapshot, load_snapshot};
