use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use readme_issues::app::build_queries;
use readme_issues::utils::{logger, validation::Validate};
use readme_issues::{LambdaConfig, RequestHandler};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct Request {
    pub body: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

async fn function_handler(
    handler: &RequestHandler,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling issue query");

    let payload = event.payload.body.unwrap_or_default();
    let response = handler.handle(payload.as_bytes()).await;

    let headers = HashMap::from([(
        "Content-Type".to_string(),
        response.content_type.to_string(),
    )]);

    Ok(Response {
        status_code: 200,
        headers,
        body: response.body,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 配置與客戶端在冷啟動時建立一次，之後的請求共用
    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let queries = build_queries(&config).await?;
    let handler = Arc::new(RequestHandler::new(queries));

    run(service_fn(move |event: LambdaEvent<Request>| {
        let handler = handler.clone();
        async move { function_handler(&handler, event).await }
    }))
    .await
}
