//! HTTP-клиент административного API
//!
//! Каждый вызов получает явный `RequestContext` (адрес API и токен).
//! Отправка спрятана за трейтом `HttpTransport`: в браузере это gloo-net,
//! в тестах `MockTransport`, записывающий запросы.

pub mod client;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod request;
pub mod transport;

pub use client::{ApiClient, RequestContext};
pub use error::ApiError;
pub use request::{ApiRequest, FileSource, FormPart, HttpMethod, MultipartForm, RequestBody, UploadFile};
pub use transport::{GlooTransport, HttpTransport, RawResponse};
