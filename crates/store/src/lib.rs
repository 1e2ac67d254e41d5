mod key;
mod kv;
mod persistence;
mod settings;

pub use key::*;
pub use kv::*;
pub use persistence::*;
pub use settings::*;
