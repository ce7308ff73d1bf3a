pub mod u501_ingredient_usage;
