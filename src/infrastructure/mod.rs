//! Infrastructure layer: concrete I/O behind the collaborator traits

pub mod error;
pub mod store_file;

pub use error::{InfraError, InfraResult};
pub use store_file::{FileSink, NodeFile};
