pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{file_config::FileConfig, lambda::LambdaConfig};

pub use crate::adapters::{BucketSource, PageSource};
pub use crate::core::{
    handler::{HandlerResponse, RequestHandler},
    resolver::IssueResolver,
    Issue, IssueFilter, IssueQueries,
};
pub use crate::utils::error::{IssueError, Result};
