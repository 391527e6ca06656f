pub mod base64;
pub mod file;
pub mod http;

// Re-export common utilities
pub use file::write_yaml;
pub use http::{FetchError, Fetcher, HttpFetcher};
