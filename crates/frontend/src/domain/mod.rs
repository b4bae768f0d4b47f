pub mod a001_product;
pub mod a006_template;
pub mod a007_order;
pub mod a008_coupon;
pub mod a009_flash_sale;
pub mod a010_testimonial;
pub mod a011_admin;
pub mod a012_customer;
pub mod a013_home_content;
