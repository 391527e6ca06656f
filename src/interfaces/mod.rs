pub mod update;

pub use update::{convert, fetch_sources, update, write_outputs, UpdateOutput};
