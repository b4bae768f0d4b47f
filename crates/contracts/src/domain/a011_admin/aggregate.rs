use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::field_errors::FieldErrors;
use crate::shared::list::ListResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    #[default]
    Admin,
    #[serde(alias = "superadmin", alias = "superAdmin")]
    SuperAdmin,
}

impl AdminRole {
    pub const ALL: [AdminRole; 2] = [AdminRole::Admin, AdminRole::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "super_admin" => AdminRole::SuperAdmin,
            _ => AdminRole::Admin,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRole::Admin => "Администратор",
            AdminRole::SuperAdmin => "Суперадминистратор",
        }
    }
}

/// Учётная запись администратора панели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for Admin {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    fn aggregate_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "admin"
    }

    fn element_name() -> &'static str {
        "Администратор"
    }

    fn list_name() -> &'static str {
        "Администраторы"
    }
}

pub type AdminListResponse = ListResponse<Admin>;

/// Форма администратора. Пароль обязателен только при создании.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Тело `POST register`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Тело `PUT admins/:id`; пустой пароль не отправляется
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAdminRequest {
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

impl AdminForm {
    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            id: Some(admin.id.clone()),
            name: admin.name.clone(),
            email: admin.email.clone(),
            password: String::new(),
            role: admin.role,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Введите имя");
        }
        if !looks_like_email(self.email.trim()) {
            errors.add("email", "Введите корректный email");
        }
        let password_required = !self.is_edit_mode();
        if (password_required || !self.password.is_empty())
            && self.password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.add(
                "password",
                format!("Пароль должен быть не короче {} символов", MIN_PASSWORD_LEN),
            );
        }
        errors
    }

    pub fn validate_register(&self) -> Result<RegisterAdminRequest, FieldErrors> {
        self.check().into_result(RegisterAdminRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }

    pub fn validate_update(&self) -> Result<UpdateAdminRequest, FieldErrors> {
        self.check().into_result(UpdateAdminRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> AdminForm {
        AdminForm {
            name: "Olga".into(),
            email: "olga@shop.io".into(),
            password: "secret1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_password_min_length_on_register() {
        assert!(form().validate_register().is_ok());
        let mut short = form();
        short.password = "12345".into();
        assert!(short.validate_register().unwrap_err().contains("password"));
    }

    #[test]
    fn test_update_keeps_password_optional() {
        let admin: Admin = serde_json::from_value(json!({
            "_id": "a1", "name": "Olga", "email": "olga@shop.io", "role": "super_admin"
        }))
        .unwrap();
        let edit = AdminForm::from_admin(&admin);
        let body = serde_json::to_value(edit.validate_update().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "Olga", "email": "olga@shop.io", "role": "super_admin" }));

        let mut short = edit.clone();
        short.password = "abc".into();
        assert!(short.validate_update().unwrap_err().contains("password"));
    }

    #[test]
    fn test_email_format() {
        let mut f = form();
        f.email = "olga".into();
        assert!(f.validate_register().unwrap_err().contains("email"));
    }
}
