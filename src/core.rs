pub mod config;
pub mod error;
pub mod id;
pub mod marker;
pub mod weight;

mod base;

pub use base::*;
pub use config::GraphConfig;
pub use error::{Error, Result, TreeViolation};
pub use id::{EdgeId, IdType, VertexId};
