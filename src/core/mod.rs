pub mod extractor;
pub mod handler;
pub mod query;
pub mod resolver;
pub mod schema;

pub use crate::domain::model::{FetchDeadline, Issue, IssueFilter, NamingRule, RawEntry};
pub use crate::domain::ports::{
    ConfigProvider, IssueQueries, ObjectLister, SourceAdapter, SourceKind,
};
pub use crate::utils::error::Result;
