pub mod error;
pub mod fix;
pub mod graph;
pub mod paths;
pub mod store;

pub use error::{FlowfixError, Result};
