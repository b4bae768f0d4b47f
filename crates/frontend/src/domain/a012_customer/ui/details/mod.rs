use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::form_status::FormStatus;
use crate::shared::format::{format_optional_date, or_dash};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a012_customer::aggregate::{BlockCustomerRequest, Customer, CustomerDetailsResponse};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_customer<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<Customer, ApiError> {
    let response: CustomerDetailsResponse = api.get(&format!("customers/{}", id)).await?;
    Ok(response.into_customer())
}

pub async fn set_blocked<T: HttpTransport>(
    api: &ApiClient<T>,
    id: &EntityId,
    is_blocked: bool,
) -> Result<(), ApiError> {
    api.put_json(&format!("customers/{}/block", id), &BlockCustomerRequest { is_blocked })
        .await
}

#[component]
#[allow(non_snake_case)]
pub fn CustomerDetails(id: EntityId, on_changed: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let customer = RwSignal::new(None::<Customer>);
    let status = FormStatus::new();
    let id = StoredValue::new(id);

    let load = move || {
        spawn_local(async move {
            match fetch_customer(&session.client(), &id.get_value()).await {
                Ok(c) => customer.set(Some(c)),
                Err(e) => status.fail(session, "customer load", e),
            }
        });
    };

    let toggle_block = move |_| {
        let Some(blocked) = customer.with_untracked(|c| c.as_ref().map(|c| c.is_blocked)) else {
            return;
        };
        status.begin();
        spawn_local(async move {
            match set_blocked(&session.client(), &id.get_value(), !blocked).await {
                Ok(()) => {
                    status.finish();
                    on_changed.run(());
                    load();
                }
                Err(e) => status.fail(session, "customer block", e),
            }
        });
    };

    load();

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">"Покупатель"</h2>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || status.busy.get() || customer.with(Option::is_none))
                        on_click=toggle_block
                    >
                        {move || if customer.with(|c| c.as_ref().is_some_and(|c| c.is_blocked)) {
                            "Разблокировать"
                        } else {
                            "Заблокировать"
                        }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("close")}
                        " Закрыть"
                    </Button>
                </Space>
            </Flex>

            <ErrorBanner error=status.error />

            {move || match customer.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(c) => view! {
                    <div class="details-grid">
                        <div><Label>"Имя"</Label><div>{or_dash(&c.name)}</div></div>
                        <div><Label>"Email"</Label><div>{or_dash(&c.email)}</div></div>
                        <div><Label>"Телефон"</Label><div>{or_dash(&c.phone)}</div></div>
                        <div><Label>"Заказов"</Label><div>{c.orders_count}</div></div>
                        <div><Label>"Зарегистрирован"</Label><div>{format_optional_date(c.created_at)}</div></div>
                        <div><Label>"Статус"</Label><div>{if c.is_blocked { "Заблокирован" } else { "Активен" }}</div></div>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_block_request() {
        let api = MockTransport::new().client();
        block_on(set_blocked(&api, &EntityId::from("c1"), true)).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "customers/c1/block");
        assert_eq!(calls[0].json(), Some(&json!({ "isBlocked": true })));
    }

    #[test]
    fn test_fetch_plain_customer() {
        let api = MockTransport::new()
            .respond(HttpMethod::Get, "customers/c1", 200, json!({ "_id": "c1", "name": "Anna", "isBlocked": true }))
            .client();
        let customer = block_on(fetch_customer(&api, &EntityId::from("c1"))).unwrap();
        assert!(customer.is_blocked);
    }
}
