use crate::domain::a001_product::ui::details::ProductDetails;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a001_product::aggregate::{Product, ProductListResponse};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_products<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Product>, ApiError> {
    let list: ProductListResponse = api.get("get-products").await?;
    Ok(list.into_items())
}

pub async fn delete_product<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<(), ApiError> {
    api.delete(&format!("delete-product/{}", id)).await
}

/// Поиск по названию без учёта регистра
pub fn filter_by_name(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Product>::new());
    let search = RwSignal::new(String::new());
    let status = FormStatus::new();

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_products(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "product list", e),
            }
        });
    };

    let open_details = move |product: Option<Product>| {
        modal_stack.open("1100px", move |handle| {
            view! {
                <ProductDetails
                    product=product.clone()
                    on_saved=Callback::new(move |_| {
                        handle.close();
                        fetch();
                    })
                    on_cancel=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let handle_delete = move |product: Product| {
        if !confirm(&format!("Удалить товар «{}»?", product.name)) {
            return;
        }
        spawn_local(async move {
            match delete_product(&session.client(), &product.id).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "product delete", e),
            }
        });
    };

    let visible = move || items.with(|list| filter_by_name(list, &search.get()));

    fetch();

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <PageHeader title="Товары">
                <Space>
                    <Input value=search placeholder="Поиск по названию" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новый товар"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </Space>
            </PageHeader>
            <ErrorBanner error=status.error />

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=64.0>""</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=220.0>"Название"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=150.0>"Категория"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Цена"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Со скидкой"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Остаток"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Действия"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || visible().into_iter().map(|product| {
                        let for_edit = product.clone();
                        let for_delete = product.clone();
                        let category = product
                            .category
                            .as_ref()
                            .and_then(|c| c.name().map(str::to_string))
                            .unwrap_or_default();
                        view! {
                            <TableRow>
                                <TableCell>
                                    {product.main_image.clone().map(|src| view! {
                                        <img class="table__thumb" src=src alt="" />
                                    })}
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_details(Some(for_edit.clone()));
                                            }
                                        >
                                            {product.name.clone()}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{category}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_money(product.price)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_money(product.discounted_price)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{product.stock}</TableCellLayout></TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| handle_delete(for_delete.clone())
                                    >
                                        {icon("delete")}
                                    </Button>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        </PageFrame>
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
    fn test_fetch_and_filter() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "get-products",
                200,
                json!({ "products": [
                    { "_id": "p1", "name": "Red Mug", "price": 10.0 },
                    { "_id": "p2", "name": "Photo frame", "price": 25.0 }
                ]}),
            )
            .client();
        let products = block_on(fetch_products(&api)).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(filter_by_name(&products, " mug").len(), 1);
        assert_eq!(filter_by_name(&products, "").len(), 2);
    }

    #[test]
    fn test_delete_path() {
        let api = MockTransport::new().client();
        block_on(delete_product(&api, &EntityId::from("p1"))).unwrap();
        assert_eq!(api.transport().count(HttpMethod::Delete, "delete-product/p1"), 1);
    }
}
