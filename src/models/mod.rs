//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the pipeline,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use subaggregator::models::{Network, ProxyDescriptor, ProxyType};
//!
//! let proxy = ProxyDescriptor {
//!     proxy_type: ProxyType::VMess,
//!     remark: "example".to_string(),
//!     hostname: "example.com".to_string(),
//!     port: 443,
//!     user_id: "b831381d-6324-4d53-ad4f-8cda48b30811".to_string(),
//!     alter_id: 0,
//!     cipher: "auto".to_string(),
//!     tls: true,
//!     network: Network::Tcp,
//!     ws_opts: None,
//! };
//! assert_eq!(proxy.endpoint_key().to_string(), "example.com:443");
//! ```

mod proxy;
pub mod proxy_group_config;
pub mod report;

pub use proxy::*;
pub use proxy_group_config::{ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
pub use report::{AggregationReport, FailedSource, RejectedLine, SourceSummary};
