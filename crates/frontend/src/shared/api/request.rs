//! Описание запроса к API, не зависящее от способа отправки

use super::error::ApiError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Источник содержимого файла
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Файл, выбранный в `<input type="file">`
    Dom(web_sys::File),
    /// Содержимое в памяти (тесты, сгенерированные файлы)
    Bytes(Vec<u8>),
}

/// Файл для multipart-запроса
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub source: FileSource,
}

impl UploadFile {
    pub fn from_dom(file: web_sys::File) -> Self {
        Self {
            file_name: file.name(),
            mime: file.type_(),
            source: FileSource::Dom(file),
        }
    }

    pub fn from_bytes(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            source: FileSource::Bytes(bytes),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Поля multipart-формы в порядке добавления
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: UploadFile) -> Self {
        self.push_file(name, file);
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: UploadFile) {
        self.parts.push(FormPart::File {
            name: name.into(),
            file,
        });
    }

    pub fn extend_text<K: Into<String>>(&mut self, fields: impl IntoIterator<Item = (K, String)>) {
        for (name, value) in fields {
            self.push_text(name, value);
        }
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                FormPart::File { name, .. } => Some(name.as_str()),
                FormPart::Text { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Путь относительно базового адреса, без ведущего `/`
    pub path: String,
    /// Готовая строка запроса без `?`
    pub query: Option<String>,
    pub body: RequestBody,
    /// Запрос без заголовка `Authorization` (вход)
    pub anonymous: bool,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into().trim_start_matches('/').to_string(),
            query: None,
            body,
            anonymous: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, RequestBody::Empty)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, RequestBody::Empty)
    }

    pub fn json<B: Serialize>(
        method: HttpMethod,
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self::new(method, path, RequestBody::Json(value)))
    }

    pub fn post_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::json(HttpMethod::Post, path, body)
    }

    pub fn put_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::json(HttpMethod::Put, path, body)
    }

    pub fn patch_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::json(HttpMethod::Patch, path, body)
    }

    pub fn multipart(method: HttpMethod, path: impl Into<String>, form: MultipartForm) -> Self {
        Self::new(method, path, RequestBody::Multipart(form))
    }

    /// Строка запроса из структуры фильтров (serde_qs, пустые `Option` пропускаются)
    pub fn with_query<Q: Serialize>(mut self, query: &Q) -> Result<Self, ApiError> {
        let encoded = serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn multipart_body(&self) -> Option<&MultipartForm> {
        match &self.body {
            RequestBody::Multipart(form) => Some(form),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Filter {
        page: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    }

    #[test]
    fn test_path_is_relative() {
        assert_eq!(ApiRequest::get("/orders").path, "orders");
        assert_eq!(ApiRequest::delete("coupons/1").path, "coupons/1");
    }

    #[test]
    fn test_query_skips_missing_filters() {
        let request = ApiRequest::get("orders")
            .with_query(&Filter { page: 2, status: None })
            .unwrap();
        assert_eq!(request.query.as_deref(), Some("page=2"));
    }

    #[test]
    fn test_multipart_keeps_order() {
        let form = MultipartForm::new()
            .text("name", "Roses")
            .file("image", UploadFile::from_bytes("a.png", "image/png", vec![1, 2]))
            .text("isActive", "true");
        let names: Vec<&str> = form.parts().iter().map(FormPart::name).collect();
        assert_eq!(names, vec!["name", "image", "isActive"]);
        assert_eq!(form.text_value("isActive"), Some("true"));
        assert_eq!(form.file_names(), vec!["image"]);
    }
}
