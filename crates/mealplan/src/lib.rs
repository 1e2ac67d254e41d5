mod date;
mod plan;
mod reference;
mod types;
mod wire;

pub use date::*;
pub use plan::*;
pub use reference::*;
pub use types::*;
