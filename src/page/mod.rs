pub mod order_page;
