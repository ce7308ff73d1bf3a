pub mod a001_sales_record;
pub mod a002_recipe;
pub mod a003_product_category;
