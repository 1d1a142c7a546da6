use serde::Serialize;

/// Invocation response envelope returned to the caller.
#[derive(Debug, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: String) -> Self {
        Response {
            status_code: 200,
            body,
        }
    }

    pub fn bad_request(body: &str) -> Self {
        Response {
            status_code: 400,
            body: body.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Response {
            status_code: 404,
            body: "Not Found!".to_string(),
        }
    }
}
