use crate::domain::a011_admin::aggregate::Admin;
use crate::shared::field_errors::FieldErrors;
use serde::{Deserialize, Serialize};

/// Ключ слота localStorage с токеном сессии
pub const TOKEN_STORAGE_KEY: &str = "admin_auth_token";

/// Тело `POST signin`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    pub fn validate(&self) -> Result<SigninRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.add("email", "Введите email");
        }
        if self.password.is_empty() {
            errors.add("password", "Введите пароль");
        }
        errors.into_result(SigninRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigninResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default, alias = "user")]
    pub admin: Option<Admin>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signin_response_shapes() {
        let r: SigninResponse = serde_json::from_str(
            r#"{"token": "jwt", "user": {"_id": "a1", "email": "root@shop.io", "role": "super_admin"}}"#,
        )
        .unwrap();
        assert_eq!(r.token, "jwt");
        assert_eq!(r.admin.unwrap().email, "root@shop.io");

        let bare: SigninResponse = serde_json::from_str(r#"{"accessToken": "t"}"#).unwrap();
        assert!(bare.admin.is_none());
    }

    #[test]
    fn test_signin_validation() {
        let errors = SigninRequest::default().validate().unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
        let ok = SigninRequest {
            email: " root@shop.io ".into(),
            password: "x".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.email, "root@shop.io");
    }
}
