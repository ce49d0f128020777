pub mod error;
pub mod snapshot;
pub mod source;
pub mod store;
