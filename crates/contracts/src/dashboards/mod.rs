pub mod d400_ingredient_summary;
pub mod d401_sales_overview;
pub mod d402_sales_pivot;
