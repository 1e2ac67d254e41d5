pub mod config;
pub mod observability;
pub mod session;
pub mod source;

pub use config::Config;
pub use session::Session;
pub use source::{JsonDirSource, LoadedData, ReferenceSource};
