//! Sequence viewer relay route
//!
//! - `GET|POST /sviewer/cgi-bin/:script` - Forwarded to the NCBI sviewer CGI

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::proxy::{SviewerError, SviewerProxy};
use crate::api::response::ErrorResponse;

pub fn sviewer_routes() -> Router<SviewerProxy> {
    Router::new().route("/cgi-bin/:script", get(forward).post(forward))
}

#[tracing::instrument(skip(proxy, body))]
async fn forward(
    State(proxy): State<SviewerProxy>,
    Path(script): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, SviewerError> {
    let relayed = proxy.forward(&script, query.as_deref(), &body).await?;
    Ok((relayed.status, relayed.headers, relayed.body).into_response())
}

impl IntoResponse for SviewerError {
    fn into_response(self) -> Response {
        match self {
            err @ SviewerError::InvalidScript(_) => ErrorResponse::validation(err.to_string()),
            SviewerError::Upstream(err) => {
                ErrorResponse::upstream("Sequence viewer request failed", &err)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_is_relayed_as_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sviewer/ncfetch.cgi"))
            .and(body_string("id=15789340"))
            .respond_with(ResponseTemplate::new(200).set_body_string(">seq"))
            .mount(&server)
            .await;

        let proxy =
            SviewerProxy::new(format!("{}/sviewer/", server.uri()), Duration::from_secs(5)).unwrap();
        let response = sviewer_routes()
            .with_state(proxy)
            .oneshot(
                Request::builder()
                    .uri("/cgi-bin/ncfetch.cgi?id=15789340")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b">seq");
    }

    #[test]
    fn test_invalid_script_is_bad_request() {
        let response = SviewerError::InvalidScript("..".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
