//! Состояние отправки формы: флаг занятости, общая ошибка и ошибки полей

use crate::shared::api::ApiError;
use crate::system::auth::context::Session;
use contracts::shared::field_errors::FieldErrors;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FormStatus {
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub fields: RwSignal<FieldErrors>,
}

impl FormStatus {
    pub fn new() -> Self {
        Self {
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            fields: RwSignal::new(FieldErrors::new()),
        }
    }

    /// Начало операции: сбросить прошлые ошибки
    pub fn begin(&self) {
        self.busy.set(true);
        self.error.set(None);
        self.fields.set(FieldErrors::new());
    }

    pub fn finish(&self) {
        self.busy.set(false);
    }

    /// Показать ошибку операции. 401 завершает сессию.
    pub fn fail(&self, session: Session, operation: &str, err: ApiError) {
        match &err {
            ApiError::Validation(_) => log::debug!("{}: form is invalid", operation),
            _ => log::error!("{}: {}", operation, err),
        }
        session.handle_error(&err);
        if let Some(fields) = err.field_errors() {
            self.fields.set(fields.clone());
        }
        self.error.set(Some(err.to_string()));
        self.busy.set(false);
    }

    pub fn field(&self, key: &'static str) -> Signal<Option<String>> {
        let fields = self.fields;
        Signal::derive(move || fields.with(|f| f.get(key).map(str::to_string)))
    }

    /// Ошибка поля с динамическим ключом (элементы списков)
    pub fn field_at(&self, key: String) -> Signal<Option<String>> {
        let fields = self.fields;
        Signal::derive(move || fields.with(|f| f.get(&key).map(str::to_string)))
    }
}

impl Default for FormStatus {
    fn default() -> Self {
        Self::new()
    }
}
