mod client;

pub use client::StatuspageClient;
