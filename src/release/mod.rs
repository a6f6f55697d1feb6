pub mod client;

pub use client::ReleaseClient;
