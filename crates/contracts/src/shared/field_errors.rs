//! Ошибки полей формы
//!
//! Один и тот же контейнер используется для локальной валидации (до запроса)
//! и для ошибок, которые вернул сервер в теле ответа.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Сообщения об ошибках, сгруппированные по имени поля
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", summarize(.0))]
pub struct FieldErrors(BTreeMap<String, String>);

fn summarize(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить ошибку. Первое сообщение для поля сохраняется.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Слить ошибки: сообщения из `other` заменяют существующие
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// `Ok(value)` если ошибок нет
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Разобрать тело ответа сервера с ошибками полей.
    ///
    /// Поддерживаются два формата:
    /// - `{ "errors": { "name": "..." } }` (значение может быть строкой, массивом строк или `{ "message": ... }`)
    /// - `{ "errors": [ { "field" | "path" | "param": "name", "message" | "msg": "..." } ] }`
    pub fn from_server_body(body: &Value) -> Option<FieldErrors> {
        let mut errors = FieldErrors::new();

        match body.get("errors") {
            Some(Value::Object(map)) => {
                for (field, value) in map {
                    if let Some(message) = message_of(value) {
                        errors.add(field.clone(), message);
                    }
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    let field = ["field", "path", "param"]
                        .iter()
                        .find_map(|k| item.get(*k).and_then(Value::as_str));
                    let message = ["message", "msg"]
                        .iter()
                        .find_map(|k| item.get(*k).and_then(Value::as_str));
                    if let (Some(field), Some(message)) = (field, message) {
                        errors.add(field, message);
                    }
                }
            }
            _ => {}
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(message_of),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_server_object_body() {
        let body = json!({
            "errors": {
                "name": "Name already taken",
                "price": ["Must be positive", "ignored"],
                "stock": { "message": "Required" }
            }
        });
        let errors = FieldErrors::from_server_body(&body).unwrap();
        assert_eq!(errors.get("name"), Some("Name already taken"));
        assert_eq!(errors.get("price"), Some("Must be positive"));
        assert_eq!(errors.get("stock"), Some("Required"));
    }

    #[test]
    fn test_server_array_body() {
        let body = json!({
            "errors": [
                { "path": "email", "msg": "Invalid email" },
                { "field": "password", "message": "Too short" },
                { "message": "no field, skipped" }
            ]
        });
        let errors = FieldErrors::from_server_body(&body).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert_eq!(errors.get("password"), Some("Too short"));
    }

    #[test]
    fn test_non_field_body() {
        assert!(FieldErrors::from_server_body(&json!({ "message": "boom" })).is_none());
        assert!(FieldErrors::from_server_body(&json!({ "errors": {} })).is_none());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.add("b", "two");
        errors.add("a", "one");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }
}
