use super::error::ApiError;
use super::request::{ApiRequest, HttpMethod, MultipartForm};
use super::transport::{GlooTransport, HttpTransport, RawResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Адрес API и токен, с которыми выполняется вызов
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub base_url: String,
    pub token: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, path, q),
            _ => format!("{}/{}", self.base_url, path),
        }
    }
}

pub struct ApiClient<T: HttpTransport = GlooTransport> {
    transport: T,
    ctx: RequestContext,
}

impl ApiClient<GlooTransport> {
    pub fn new(ctx: RequestContext) -> Self {
        Self::with_transport(GlooTransport, ctx)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(transport: T, ctx: RequestContext) -> Self {
        Self { transport, ctx }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Отправить запрос; ответ вне 2xx превращается в `ApiError`
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.ctx.url(&request.path, request.query.as_deref());
        let token = if request.anonymous {
            None
        } else {
            self.ctx.token.as_deref()
        };

        log::debug!("{} {}", request.method, url);
        let response = self.transport.send(&url, token, &request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, &response.body);
            log::error!("{} {} failed: {} ({})", request.method, url, err, response.status);
            Err(err)
        }
    }

    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Отправить запрос, тело ответа не нужно
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.fetch(ApiRequest::post_json(path, body)?).await
    }

    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(ApiRequest::put_json(path, body)?).await
    }

    pub async fn patch_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(ApiRequest::patch_json(path, body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(path)).await
    }

    pub async fn send_multipart(
        &self,
        method: HttpMethod,
        path: &str,
        form: MultipartForm,
    ) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::multipart(method, path, form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_url_joins_path_and_query() {
        let ctx = RequestContext::new("https://api.example.com/api/", None);
        assert_eq!(ctx.url("/orders", None), "https://api.example.com/api/orders");
        assert_eq!(
            ctx.url("orders", Some("page=1")),
            "https://api.example.com/api/orders?page=1"
        );
        assert_eq!(ctx.url("orders", Some("")), "https://api.example.com/api/orders");
    }

    #[test]
    fn test_bearer_token_sent_except_anonymous() {
        let mock = MockTransport::new();
        let api = mock.client_with_token("secret");
        block_on(async {
            api.execute(ApiRequest::get("admins")).await.unwrap();
            api.execute(ApiRequest::get("signin").anonymous()).await.unwrap();
        });
        let calls = api.transport().requests();
        assert_eq!(calls[0].token.as_deref(), Some("secret"));
        assert_eq!(calls[1].token, None);
    }

    #[test]
    fn test_server_error_is_mapped() {
        let mock = MockTransport::new().respond(
            HttpMethod::Post,
            "coupons",
            409,
            json!({ "message": "Duplicate", "errors": { "code": "Code exists" } }),
        );
        let api = mock.client();
        let err = block_on(api.execute(ApiRequest::post_json("coupons", &json!({})).unwrap()))
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("code"), Some("Code exists"));
    }

    #[test]
    fn test_decode_error() {
        let mock = MockTransport::new().respond_text(HttpMethod::Get, "orders", 200, "not json");
        let api = mock.client();
        let result: Result<Vec<String>, ApiError> = block_on(api.get("orders"));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
