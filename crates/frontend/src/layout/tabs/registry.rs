//! Ключ вкладки → страница. Все ключи вкладок собраны здесь.
//! Детальные формы открываются модальными окнами внутри страниц.

use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a006_template::ui::list::TemplateList;
use crate::domain::a007_order::ui::list::OrderList;
use crate::domain::a008_coupon::ui::list::CouponList;
use crate::domain::a009_flash_sale::ui::list::FlashSaleList;
use crate::domain::a010_testimonial::ui::list::TestimonialList;
use crate::domain::a011_admin::ui::list::AdminList;
use crate::domain::a012_customer::ui::list::CustomerList;
use crate::domain::a013_home_content::ui::details::HomeContentEditor;
use crate::shared::hierarchy_page::{HierarchyKind, HierarchyPage};
use crate::system::auth::guard::RequireSuperAdmin;
use leptos::prelude::*;

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        "a001_product" => view! { <ProductList /> }.into_any(),
        "a002_category" => view! { <HierarchyPage kind=HierarchyKind::Category /> }.into_any(),
        "a003_occasion" => view! { <HierarchyPage kind=HierarchyKind::Occasion /> }.into_any(),
        "a004_recipient" => view! { <HierarchyPage kind=HierarchyKind::Recipient /> }.into_any(),
        "a005_section" => view! { <HierarchyPage kind=HierarchyKind::Section /> }.into_any(),
        "a006_template" => view! { <TemplateList /> }.into_any(),
        "a007_order" => view! { <OrderList /> }.into_any(),
        "a008_coupon" => view! { <CouponList /> }.into_any(),
        "a009_flash_sale" => view! { <FlashSaleList /> }.into_any(),
        "a010_testimonial" => view! { <TestimonialList /> }.into_any(),
        "a011_admin" => view! {
            <RequireSuperAdmin>
                <AdminList />
            </RequireSuperAdmin>
        }
        .into_any(),
        "a012_customer" => view! { <CustomerList /> }.into_any(),
        "a013_home_content" => view! { <HomeContentEditor /> }.into_any(),
        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">"Раздел не найден"</div> }.into_any()
        }
    }
}
