pub mod aggregator;
pub mod cli;
pub mod error;
pub mod github;
pub mod join;
pub mod models;
pub mod search;
pub mod server;
pub mod service;
pub mod types;

pub use error::{Result, TrendingError, UpstreamError};
pub use models::{RepositoryDetail, RepositoryId};
pub use service::ProjectService;
pub use types::RepositorySummary;
