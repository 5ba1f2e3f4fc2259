use crate::core::schema::{build_schema, IssueSchema};
use crate::core::IssueQueries;
use std::fmt::Display;
use std::sync::Arc;

/// Returned for empty requests instead of running a query.
pub const DEFAULT_PAYLOAD: &str = include_str!("graphiql.html");

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub content_type: &'static str,
    pub body: String,
}

impl HandlerResponse {
    fn json(body: String) -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }
}

/// Entry point turning a raw request payload into a raw response payload.
pub struct RequestHandler {
    schema: IssueSchema,
}

impl RequestHandler {
    pub fn new(queries: Arc<dyn IssueQueries>) -> Self {
        Self {
            schema: build_schema(queries),
        }
    }

    pub async fn handle(&self, payload: &[u8]) -> HandlerResponse {
        if payload.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Empty request, returning default payload");
            return HandlerResponse {
                content_type: CONTENT_TYPE_HTML,
                body: DEFAULT_PAYLOAD.to_string(),
            };
        }

        // 請求格式: {"query": ..., "operationName": ..., "variables": ...}
        let request: async_graphql::Request = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejecting malformed request: {}", e);
                return HandlerResponse::json(render_error(&e));
            }
        };

        tracing::debug!("Executing query: {}", request.query);
        let response = self.schema.execute(request).await;
        if response.is_err() {
            tracing::warn!("Query finished with {} errors", response.errors.len());
        }

        match serde_json::to_string(&response) {
            Ok(body) => HandlerResponse::json(body),
            Err(e) => HandlerResponse::json(render_error(&e)),
        }
    }
}

/// Minimal error payload for failures that happen before a query can run.
pub fn render_error(err: &dyn Display) -> String {
    serde_json::json!({ "errors": [{ "message": err.to_string() }] }).to_string()
}
