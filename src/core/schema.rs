use crate::core::{Issue, IssueFilter, IssueQueries};
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};
use std::sync::Arc;

pub type IssueSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(queries: Arc<dyn IssueQueries>) -> IssueSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(queries)
        .finish()
}

pub struct IssueNode(Issue);

/// A single issue of the magazine.
#[Object(name = "Issue")]
impl IssueNode {
    async fn title(&self) -> &str {
        &self.0.title
    }

    /// Locator of the cover image.
    async fn image(&self) -> &str {
        &self.0.image
    }

    /// Locator of the issue document.
    async fn document(&self) -> &str {
        &self.0.document
    }

    async fn year(&self) -> i32 {
        self.0.year
    }

    /// Issue number within the year, usually 1 to 6.
    async fn issue_number(&self) -> i32 {
        self.0.issue_number
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a list of issues, newest first.
    async fn list_issues(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Filter by year")] year: Option<i32>,
        #[graphql(desc = "Filter by issue number, 1 to 6")] issue_number: Option<i32>,
        #[graphql(desc = "Get the first n issues")] first: Option<i32>,
    ) -> async_graphql::Result<Vec<IssueNode>> {
        let first = match first {
            Some(n) if n <= 0 => {
                return Err(async_graphql::Error::new(
                    "first must be a positive integer",
                ))
            }
            Some(n) => Some(n as usize),
            None => None,
        };
        let filter = IssueFilter {
            year,
            issue_number,
            first,
        };

        let queries = ctx.data::<Arc<dyn IssueQueries>>()?;
        let issues = queries
            .list_issues(&filter)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(issues.into_iter().map(IssueNode).collect())
    }

    /// Get the latest issue.
    async fn latest_issue(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<IssueNode>> {
        let queries = ctx.data::<Arc<dyn IssueQueries>>()?;
        let latest = queries
            .latest_issue()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(latest.map(IssueNode))
    }
}
