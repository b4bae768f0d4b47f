use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use contracts::system::auth::{SigninRequest, SigninResponse};

/// Sign in with email and password (`POST signin`, no bearer token)
pub async fn signin<T: HttpTransport>(
    api: &ApiClient<T>,
    request: &SigninRequest,
) -> Result<SigninResponse, ApiError> {
    let request = request.validate()?;
    api.fetch(ApiRequest::post_json("signin", &request)?.anonymous())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_signin_returns_token() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Post,
                "signin",
                200,
                json!({ "token": "jwt", "admin": { "_id": "a1", "email": "root@shop.io" } }),
            )
            .client_with_token("stale");
        let request = SigninRequest {
            email: " root@shop.io ".into(),
            password: "secret".into(),
        };
        let response = block_on(signin(&api, &request)).unwrap();
        assert_eq!(response.token, "jwt");

        let calls = api.transport().requests();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, None);
        assert_eq!(calls[0].json().unwrap()["email"], "root@shop.io");
    }

    #[test]
    fn test_empty_credentials_not_sent() {
        let api = MockTransport::new().client();
        let err = block_on(signin(&api, &SigninRequest::default())).unwrap_err();
        assert!(err.field_errors().unwrap().contains("email"));
        assert_eq!(api.transport().total(), 0);
    }
}
