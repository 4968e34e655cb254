//! Request body extractor accepting HTML forms or JSON

use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Body extractor that dispatches on `Content-Type`.
///
/// `application/json` is decoded as JSON; anything else goes through the
/// urlencoded form decoder, which rejects unsupported media types itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

/// Body rejection rendered as plain text
#[derive(Debug)]
pub struct PayloadRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(Payload(value)),
                Err(rejection) => Err(PayloadRejection {
                    status: rejection.status(),
                    message: format!("Invalid JSON body: {}", rejection.body_text()),
                }),
            }
        } else {
            match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(Payload(value)),
                Err(rejection) => Err(PayloadRejection {
                    status: rejection.status(),
                    message: format!("Invalid form body: {}", rejection.body_text()),
                }),
            }
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: String,
        email: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "name=Ana+Lopez&email=ana%40x.com",
        );

        let Payload(sample) = Payload::<Sample>::from_request(req, &()).await.unwrap();
        assert_eq!(sample.name, "Ana Lopez");
        assert_eq!(sample.email.as_deref(), Some("ana@x.com"));
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = request(
            Some("application/json; charset=utf-8"),
            r#"{"name":"Ana","role":"admin"}"#,
        );

        let Payload(sample) = Payload::<Sample>::from_request(req, &()).await.unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "Ana".to_string(),
                email: None
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let req = request(Some("application/json"), "{not json");

        let rejection = Payload::<Sample>::from_request(req, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert!(rejection.message.starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_rejected() {
        let req = request(Some("text/plain"), "name=Ana");

        let rejection = Payload::<Sample>::from_request(req, &()).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
