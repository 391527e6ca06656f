//! Settings module for subaggregator
//!
//! Sources, fetch limits, naming, group and output settings for one run.

pub mod config;

pub use config::{
    FetchSettings, GroupSettings, NamingSettings, OutputSettings, Settings, SettingsError,
    SourceConfig,
};
