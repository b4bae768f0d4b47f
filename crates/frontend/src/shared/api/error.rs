use contracts::shared::field_errors::FieldErrors;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Форма не прошла проверку, запрос не отправлялся
    #[error("Проверьте заполнение полей")]
    Validation(FieldErrors),

    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        fields: FieldErrors,
    },

    #[error("Сессия истекла, войдите снова")]
    Unauthorized,

    #[error("Ошибка сети: {0}")]
    Network(String),

    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),

    #[error("Не удалось сформировать запрос: {0}")]
    Encode(String),
}

impl ApiError {
    /// Ошибка по ответу с кодом вне 2xx
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let fields = parsed
            .as_ref()
            .and_then(FieldErrors::from_server_body)
            .unwrap_or_default();
        let message = parsed
            .as_ref()
            .and_then(|v| {
                ["message", "error", "msg"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(Value::as_str))
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        ApiError::Server {
            status,
            message,
            fields,
        }
    }

    /// Ошибки по полям: локальная проверка или ответ сервера
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(fields) => Some(fields),
            ApiError::Server { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(ApiError::from_status(401, "{}"), ApiError::Unauthorized);
    }

    #[test]
    fn test_server_field_errors() {
        let body = r#"{"message": "Validation failed", "errors": {"name": "Already exists"}}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.to_string(), "Validation failed");
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("name"), Some("Already exists"));
    }

    #[test]
    fn test_plain_text_body() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_validation_exposes_fields() {
        let mut errors = FieldErrors::new();
        errors.add("code", "Required");
        let err = ApiError::from(errors);
        assert_eq!(err.field_errors().unwrap().get("code"), Some("Required"));
    }
}
