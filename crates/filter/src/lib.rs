mod builder;
mod catalogue;
mod filter;
mod reconcile;
mod selector;

pub use builder::*;
pub use catalogue::*;
pub use filter::*;
pub use reconcile::*;
pub use selector::*;
