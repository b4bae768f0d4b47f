//! Заголовки вкладок. Для агрегатов берутся из `AggregateRoot::list_name`.

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_occasion::aggregate::Occasion;
use contracts::domain::a004_recipient::aggregate::Recipient;
use contracts::domain::a005_section::aggregate::Section;
use contracts::domain::a006_template::aggregate::Template;
use contracts::domain::a007_order::aggregate::Order;
use contracts::domain::a008_coupon::aggregate::Coupon;
use contracts::domain::a009_flash_sale::aggregate::FlashSale;
use contracts::domain::a010_testimonial::aggregate::Testimonial;
use contracts::domain::a011_admin::aggregate::Admin;
use contracts::domain::a012_customer::aggregate::Customer;
use contracts::domain::common::AggregateRoot;

pub const HOME_CONTENT_KEY: &str = "a013_home_content";

/// Заголовок вкладки; пустая строка для неизвестного ключа
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_product" => Product::list_name(),
        "a002_category" => Category::list_name(),
        "a003_occasion" => Occasion::list_name(),
        "a004_recipient" => Recipient::list_name(),
        "a005_section" => Section::list_name(),
        "a006_template" => Template::list_name(),
        "a007_order" => Order::list_name(),
        "a008_coupon" => Coupon::list_name(),
        "a009_flash_sale" => FlashSale::list_name(),
        "a010_testimonial" => Testimonial::list_name(),
        "a011_admin" => Admin::list_name(),
        "a012_customer" => Customer::list_name(),
        HOME_CONTENT_KEY => "Главная страница",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_aggregate_names() {
        assert_eq!(Product::full_name(), "a001_product");
        assert_eq!(FlashSale::full_name(), "a009_flash_sale");
        assert_eq!(tab_label_for_key(&Customer::full_name()), "Покупатели");
        assert_eq!(tab_label_for_key("sys_unknown"), "");
    }
}
