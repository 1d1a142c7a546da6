use serde_json::Value;

/// Fully validated caller intent. Only `Request::validate` constructs this,
/// so a value in hand always has every field present and correctly typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub aws_services: Vec<String>,
    pub target_service: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Start,
    Stop,
    Status,
}

impl Action {
    pub fn parse(name: &str) -> Option<Action> {
        match name {
            "start" => Some(Action::Start),
            "stop" => Some(Action::Stop),
            "status" => Some(Action::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub message: &'static str,
}

impl ValidationError {
    fn new(message: &'static str) -> Self {
        ValidationError { message }
    }
}

impl Request {
    /// Checks the event fields in order, stopping at the first offence.
    pub fn validate(event: &Value) -> Result<Request, ValidationError> {
        let aws_services = match event.get("aws_service") {
            None | Some(Value::Null) => Err(ValidationError::new("aws_service is required!")),
            Some(Value::Array(items)) if items.is_empty() => {
                Err(ValidationError::new("aws_service is required!"))
            }
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
                .ok_or_else(|| ValidationError::new("aws_service is invalid!")),
            Some(_) => Err(ValidationError::new("aws_service is invalid!")),
        }?;

        let target_service = match event.get("target_service") {
            None | Some(Value::Null) => Err(ValidationError::new("target_service is required!")),
            Some(Value::Object(mapping)) if mapping.is_empty() => {
                Err(ValidationError::new("target_service is required!"))
            }
            Some(Value::Object(mapping)) => mapping
                .get("service")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ValidationError::new("target_service is invalid!")),
            Some(_) => Err(ValidationError::new("target_service is invalid!")),
        }?;

        let action = match event.get("action") {
            None | Some(Value::Null) => Err(ValidationError::new("action is required!")),
            Some(Value::String(name)) if name.is_empty() => {
                Err(ValidationError::new("action is required!"))
            }
            Some(Value::String(name)) => Ok(name.clone()),
            Some(_) => Err(ValidationError::new("action is invalid!")),
        }?;

        Ok(Request {
            aws_services,
            target_service,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::request::{Action, Request};
    use serde_json::json;

    #[test]
    fn test_validate() {
        let event = json!({
            "aws_service": ["ec2", "autoscaling"],
            "target_service": {"service": "web"},
            "action": "start",
        });

        let request = Request::validate(&event).unwrap();

        assert_eq!(
            request,
            Request {
                aws_services: vec!["ec2".to_string(), "autoscaling".to_string()],
                target_service: "web".to_string(),
                action: "start".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_aws_service_missing() {
        let event = json!({
            "target_service": {"service": "web"},
            "action": "start",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "aws_service is required!");
    }

    #[test]
    fn test_validate_aws_service_empty() {
        let event = json!({
            "aws_service": [],
            "target_service": {"service": "web"},
            "action": "start",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "aws_service is required!");
    }

    #[test]
    fn test_validate_aws_service_not_a_list() {
        let event = json!({
            "aws_service": "ec2",
            "target_service": {"service": "web"},
            "action": "status",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "aws_service is invalid!");
    }

    #[test]
    fn test_validate_aws_service_with_non_string_entry() {
        let event = json!({
            "aws_service": ["ec2", 2],
            "target_service": {"service": "web"},
            "action": "status",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "aws_service is invalid!");
    }

    #[test]
    fn test_validate_target_service_missing() {
        let event = json!({
            "aws_service": ["ec2"],
            "action": "start",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "target_service is required!");
    }

    #[test]
    fn test_validate_target_service_not_a_mapping() {
        let event = json!({
            "aws_service": ["ec2"],
            "target_service": "web",
            "action": "start",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "target_service is invalid!");
    }

    #[test]
    fn test_validate_target_service_without_service_key() {
        let event = json!({
            "aws_service": ["ec2"],
            "target_service": {"name": "web"},
            "action": "start",
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "target_service is invalid!");
    }

    #[test]
    fn test_validate_action_missing() {
        let event = json!({
            "aws_service": ["ec2"],
            "target_service": {"service": "web"},
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "action is required!");
    }

    #[test]
    fn test_validate_action_not_a_string() {
        let event = json!({
            "aws_service": ["ec2"],
            "target_service": {"service": "web"},
            "action": 1,
        });

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "action is invalid!");
    }

    #[test]
    fn test_validate_checks_aws_service_first() {
        let event = json!({"action": 1});

        let error = Request::validate(&event).unwrap_err();
        assert_eq!(error.message, "aws_service is required!");
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(Action::parse("start"), Some(Action::Start));
        assert_eq!(Action::parse("stop"), Some(Action::Stop));
        assert_eq!(Action::parse("status"), Some(Action::Status));
        assert_eq!(Action::parse("restart"), None);
        assert_eq!(Action::parse("Start"), None);
    }
}
