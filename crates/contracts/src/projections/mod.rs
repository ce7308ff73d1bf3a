pub mod p900_ingredient_usage;
