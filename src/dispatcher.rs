use crate::config::Config;
use crate::control::{build_controllers, Control};
use crate::error::ControlResourceError;
use crate::request::{Action, Request};
use crate::response::Response;
use serde_json::Value;
use tracing::{info, warn};

/// Handles one invocation: validate, build one controller per requested
/// kind, route the action, respond.
///
/// Validation and unknown-kind failures are answered with a 400 response and
/// an unknown action with 404; provider-call failures are not handled here
/// and fail the invocation.
pub async fn handle(event: Value, config: &Config) -> Result<Response, ControlResourceError> {
    let request = match Request::validate(&event) {
        Ok(request) => request,
        Err(error) => {
            warn!("rejected request: {}", error.message);
            return Ok(Response::bad_request(error.message));
        }
    };

    let controllers = match build_controllers(&request.aws_services, &config.region) {
        Ok(controllers) => controllers,
        Err(error) => {
            warn!("rejected request: {}", error);
            return Ok(Response::bad_request("aws_service is invalid!"));
        }
    };

    route(&request, &controllers, config).await
}

pub(crate) async fn route(
    request: &Request,
    controllers: &[Box<dyn Control + Send + Sync>],
    config: &Config,
) -> Result<Response, ControlResourceError> {
    let action = match Action::parse(&request.action) {
        Some(action) => action,
        None => return Ok(Response::not_found()),
    };
    info!(
        "{} requested for service {}",
        request.action, request.target_service
    );

    let mut body = config.environment_banner();
    match action {
        Action::Status => {
            let mut found = Vec::new();
            for controller in controllers {
                found.extend(controller.status(&request.target_service).await?);
            }
            if found.is_empty() {
                body.push_str("no services are running");
            } else {
                body.push_str(&format!(
                    "the following services are running\n{}",
                    serde_json::to_string(&found)?
                ));
            }
        }
        Action::Start | Action::Stop => {
            // Fire-and-forget: the provider has accepted the requests once
            // apply returns, the resources converge on their own.
            for controller in controllers {
                controller
                    .apply(action, &request.target_service)
                    .await?;
            }
            body.push_str(match action {
                Action::Start => "start request accepted",
                _ => "stop request accepted",
            });
        }
    }
    Ok(Response::ok(body))
}
