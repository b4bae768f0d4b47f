//! Coupon Details - ViewModel

use crate::shared::form_status::FormStatus;
use crate::shared::reference::ReferenceLists;
use contracts::domain::a008_coupon::aggregate::{Coupon, CouponForm, CouponScope, DiscountType, RestrictionKind};
use contracts::domain::common::EntityId;
use leptos::prelude::*;

/// Ключ вкладки ограничений
pub fn restriction_key(kind: RestrictionKind) -> &'static str {
    match kind {
        RestrictionKind::Users => "users",
        RestrictionKind::Products => "products",
        RestrictionKind::Categories => "categories",
        RestrictionKind::Occasions => "occasions",
        RestrictionKind::Recipients => "recipients",
    }
}

fn restriction_from_key(key: &str) -> RestrictionKind {
    RestrictionKind::ALL
        .into_iter()
        .find(|k| restriction_key(*k) == key)
        .unwrap_or(RestrictionKind::Users)
}

#[derive(Clone, Copy)]
pub struct CouponDetailsVm {
    pub id: RwSignal<Option<EntityId>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub discount_type: RwSignal<String>,
    pub discount_value: RwSignal<String>,
    pub min_order_amount: RwSignal<String>,
    pub max_discount: RwSignal<String>,
    pub usage_limit: RwSignal<String>,
    pub valid_from: RwSignal<String>,
    pub valid_until: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    /// Пустой список означает «для всех»
    pub scope: RwSignal<CouponScope>,
    pub restriction_tab: RwSignal<String>,
    pub reference: RwSignal<ReferenceLists>,

    pub status: FormStatus,
}

impl CouponDetailsVm {
    pub fn new() -> Self {
        let defaults = CouponForm::default();
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            discount_type: RwSignal::new(defaults.discount_type.as_str().to_string()),
            discount_value: RwSignal::new(String::new()),
            min_order_amount: RwSignal::new(String::new()),
            max_discount: RwSignal::new(String::new()),
            usage_limit: RwSignal::new(String::new()),
            valid_from: RwSignal::new(String::new()),
            valid_until: RwSignal::new(String::new()),
            is_active: RwSignal::new(defaults.is_active),
            scope: RwSignal::new(CouponScope::default()),
            restriction_tab: RwSignal::new(restriction_key(RestrictionKind::Users).to_string()),
            reference: RwSignal::new(ReferenceLists::default()),
            status: FormStatus::new(),
        }
    }

    pub fn load(&self, coupon: &Coupon) {
        let form = CouponForm::from_coupon(coupon);
        self.id.set(form.id);
        self.code.set(form.code);
        self.description.set(form.description);
        self.discount_type.set(form.discount_type.as_str().to_string());
        self.discount_value.set(form.discount_value);
        self.min_order_amount.set(form.min_order_amount);
        self.max_discount.set(form.max_discount);
        self.usage_limit.set(form.usage_limit);
        self.valid_from.set(form.valid_from);
        self.valid_until.set(form.valid_until);
        self.is_active.set(form.is_active);
        self.scope.set(form.scope);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with(Option::is_some)
    }

    pub fn to_form(&self) -> CouponForm {
        CouponForm {
            id: self.id.get_untracked(),
            code: self.code.get_untracked(),
            description: self.description.get_untracked(),
            discount_type: DiscountType::parse(&self.discount_type.get_untracked()),
            discount_value: self.discount_value.get_untracked(),
            min_order_amount: self.min_order_amount.get_untracked(),
            max_discount: self.max_discount.get_untracked(),
            usage_limit: self.usage_limit.get_untracked(),
            valid_from: self.valid_from.get_untracked(),
            valid_until: self.valid_until.get_untracked(),
            is_active: self.is_active.get_untracked(),
            scope: self.scope.get_untracked(),
        }
    }

    pub fn active_restriction(&self) -> RestrictionKind {
        self.restriction_tab.with(|key| restriction_from_key(key))
    }

    pub fn selected_ids(&self, kind: RestrictionKind) -> Signal<Vec<EntityId>> {
        let scope = self.scope;
        Signal::derive(move || scope.with(|s| s.list(kind).to_vec()))
    }

    pub fn toggle(&self, kind: RestrictionKind, id: EntityId) {
        self.scope.update(|s| s.toggle(kind, id));
    }

    pub fn clear(&self, kind: RestrictionKind) {
        self.scope.update(|s| s.clear(kind));
    }
}

impl Default for CouponDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
