//! Отправка запросов: трейт транспорта и реализация на gloo-net

use super::error::ApiError;
use super::request::{ApiRequest, FileSource, FormPart, HttpMethod, MultipartForm, RequestBody};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

/// Ответ сервера до разбора тела
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(
        &self,
        url: &str,
        token: Option<&str>,
        request: &ApiRequest,
    ) -> Result<RawResponse, ApiError>;
}

/// Транспорт браузера (fetch через gloo-net)
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn js_error(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Encode(format!("{:?}", e))
}

fn form_data(form: &MultipartForm) -> Result<web_sys::FormData, ApiError> {
    let data = web_sys::FormData::new().map_err(js_error)?;
    for part in form.parts() {
        match part {
            FormPart::Text { name, value } => {
                data.append_with_str(name, value).map_err(js_error)?;
            }
            FormPart::File { name, file } => match &file.source {
                FileSource::Dom(dom_file) => {
                    data.append_with_blob_and_filename(name, dom_file, &file.file_name)
                        .map_err(js_error)?;
                }
                FileSource::Bytes(bytes) => {
                    let array = js_sys::Array::new();
                    array.push(&js_sys::Uint8Array::from(bytes.as_slice()));
                    let options = web_sys::BlobPropertyBag::new();
                    options.set_type(&file.mime);
                    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &options)
                        .map_err(js_error)?;
                    data.append_with_blob_and_filename(name, &blob, &file.file_name)
                        .map_err(js_error)?;
                }
            },
        }
    }
    Ok(data)
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Patch => Request::patch(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(
        &self,
        url: &str,
        token: Option<&str>,
        request: &ApiRequest,
    ) -> Result<RawResponse, ApiError> {
        let mut builder = builder(request.method, url).header("Accept", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        // Content-Type для multipart выставляет браузер (с boundary)
        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.body(form_data(form)?),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
