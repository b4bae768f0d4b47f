//! Flash Sale Details - ViewModel

use crate::shared::form_status::FormStatus;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a009_flash_sale::aggregate::{FlashSale, FlashSaleForm};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct FlashSaleDetailsVm {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub starts_at: RwSignal<String>,
    pub ends_at: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    /// Id и товары; поля заголовка берутся из сигналов выше
    pub cart: RwSignal<FlashSaleForm>,
    pub products: RwSignal<Vec<Product>>,
    pub status: FormStatus,
}

impl FlashSaleDetailsVm {
    pub fn new() -> Self {
        let defaults = FlashSaleForm::default();
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            starts_at: RwSignal::new(String::new()),
            ends_at: RwSignal::new(String::new()),
            is_active: RwSignal::new(defaults.is_active),
            cart: RwSignal::new(defaults),
            products: RwSignal::new(Vec::new()),
            status: FormStatus::new(),
        }
    }

    pub fn load(&self, sale: &FlashSale) {
        let form = FlashSaleForm::from_sale(sale);
        self.name.set(form.name.clone());
        self.description.set(form.description.clone());
        self.starts_at.set(form.starts_at.clone());
        self.ends_at.set(form.ends_at.clone());
        self.is_active.set(form.is_active);
        self.cart.set(form);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.cart.with(FlashSaleForm::is_edit_mode)
    }

    pub fn to_form(&self) -> FlashSaleForm {
        let mut form = self.cart.get_untracked();
        form.name = self.name.get_untracked();
        form.description = self.description.get_untracked();
        form.starts_at = self.starts_at.get_untracked();
        form.ends_at = self.ends_at.get_untracked();
        form.is_active = self.is_active.get_untracked();
        form
    }

    pub fn selected_ids(&self) -> Signal<Vec<EntityId>> {
        let cart = self.cart;
        Signal::derive(move || cart.with(|f| f.items.iter().map(|i| i.product_id.clone()).collect()))
    }

    /// Клик в пикере: добавить товар или убрать уже выбранный
    pub fn toggle_product(&self, product: Product) {
        self.cart.update(|f| {
            if !f.add_product(&product) {
                f.remove_product(&product.id);
            }
        });
        self.status.fields.update(|e| e.clear_field("items"));
    }

    pub fn remove_product(&self, id: &EntityId) {
        self.cart.update(|f| f.remove_product(id));
    }

    pub fn set_sale_price(&self, id: &EntityId, raw: String) {
        self.cart.update(|f| f.set_sale_price(id, raw));
    }

    pub fn set_discount(&self, id: &EntityId, raw: String) {
        self.cart.update(|f| f.set_discount(id, raw));
    }

    /// Ошибка цены или скидки строки; индекс берётся по текущему положению в списке
    pub fn item_error(&self, key: Uuid) -> Signal<Option<String>> {
        let cart = self.cart;
        let fields = self.status.fields;
        Signal::derive(move || {
            let index = cart.with(|f| f.items.iter().position(|i| i.key == key))?;
            fields.with(|e| {
                e.get(&format!("items.{index}.salePrice"))
                    .or_else(|| e.get(&format!("items.{index}.discount")))
                    .map(str::to_string)
            })
        })
    }
}

impl Default for FlashSaleDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
