mod auto_scaling_group_client;
mod config;
mod control;
mod dispatcher;
mod ec2_instance_client;
mod error;
mod request;
mod response;

use crate::config::Config;
use lambda_runtime::{handler_fn, Context, Error};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_target(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .init();

    lambda_runtime::run(handler_fn(control_handler)).await?;
    Ok(())
}

async fn control_handler(event: Value, _: Context) -> Result<Value, Error> {
    let config = Config::from_env();
    let response = dispatcher::handle(event, &config).await?;
    Ok(serde_json::to_value(response)?)
}
