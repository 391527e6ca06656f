pub mod config;
pub mod exports;
pub mod yaml;

pub use config::remark::resolve_names;
pub use exports::clash::assemble;
