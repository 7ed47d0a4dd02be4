pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, SearchProviderKind};
pub use error::ProposalError;
pub use types::*;
