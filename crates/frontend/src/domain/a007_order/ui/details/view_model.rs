use crate::shared::form_status::FormStatus;
use contracts::domain::a007_order::aggregate::Order;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub order: RwSignal<Option<Order>>,
    /// Selected values of the two status selects
    pub status: RwSignal<String>,
    pub delivery_status: RwSignal<String>,
    pub form: FormStatus,
}

impl OrderDetailsVm {
    pub fn new() -> Self {
        Self {
            order: RwSignal::new(None),
            status: RwSignal::new(String::new()),
            delivery_status: RwSignal::new(String::new()),
            form: FormStatus::new(),
        }
    }

    pub fn load(&self, order: Order) {
        self.status.set(order.status.as_str().to_string());
        self.delivery_status.set(order.delivery_status.as_str().to_string());
        self.order.set(Some(order));
    }

    pub fn status_changed(&self) -> bool {
        self.order.with(|o| {
            o.as_ref()
                .is_some_and(|o| o.status.as_str() != self.status.get())
        })
    }

    pub fn delivery_changed(&self) -> bool {
        self.order.with(|o| {
            o.as_ref()
                .is_some_and(|o| o.delivery_status.as_str() != self.delivery_status.get())
        })
    }
}

impl Default for OrderDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
