use super::error::RecipeError;
use crate::shared::csv_table::{cell, numeric_cell, CsvTable};
use crate::shared::normalize::clean_machine_id;
use contracts::domain::a002_recipe::RecipeRow;
use maplit::hashmap;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Recipe file name suffix: `<machine>_Recipe.csv`
pub const RECIPE_SUFFIX: &str = "_Recipe.csv";

/// Accepted headers per recipe field: the original Korean export headers
/// first, then English names
static COLUMN_ALIASES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    hashmap! {
        "product_name" => vec!["제품명", "Product Name", "ProductName"],
        "ingredients" => vec!["원료명", "Ingredients"],
        "bean" => vec!["원두 글라인딩 양", "Bean"],
        "powder1" => vec!["1번 파우더량(S)", "Powder1"],
        "powder2" => vec!["2번 파우더량(S)", "Powder2"],
        "syrup" => vec!["시럽량(S)", "Syrup"],
    }
});

fn column(table: &CsvTable, field: &str) -> Option<usize> {
    COLUMN_ALIASES
        .get(field)
        .and_then(|aliases| table.column(aliases))
}

/// Path of a machine's recipe table; the machine id is reduced to its final
/// path segment first
pub fn recipe_path(recipe_dir: &Path, machine_id: &str) -> PathBuf {
    recipe_dir.join(format!("{}{}", clean_machine_id(machine_id), RECIPE_SUFFIX))
}

/// Maps recipe CSV text onto [`RecipeRow`]s.
/// Fails when the text is not CSV or has no product name column.
pub fn parse_recipe_rows(text: &str) -> Result<Vec<RecipeRow>, String> {
    let table = CsvTable::parse(text).map_err(|e| e.to_string())?;

    let Some(product_col) = column(&table, "product_name") else {
        return Err(format!(
            "no product name column (제품명) in headers {:?}",
            table.headers()
        ));
    };
    let ingredients_col = column(&table, "ingredients");
    let bean_col = column(&table, "bean");
    let powder1_col = column(&table, "powder1");
    let powder2_col = column(&table, "powder2");
    let syrup_col = column(&table, "syrup");

    let mut rows = Vec::with_capacity(table.records().len());
    for (idx, record) in table.records().iter().enumerate() {
        let Some(product_name) = cell(record, Some(product_col)) else {
            tracing::warn!("Skipping recipe row {}: empty product name", idx + 2);
            continue;
        };

        rows.push(RecipeRow {
            product_name,
            ingredients: cell(record, ingredients_col),
            bean: numeric_cell(record, bean_col),
            powder1_seconds: numeric_cell(record, powder1_col),
            powder2_seconds: numeric_cell(record, powder2_col),
            syrup_seconds: numeric_cell(record, syrup_col),
        });
    }

    Ok(rows)
}

/// Reads the recipe table of one machine
pub fn read_recipe_rows(recipe_dir: &Path, machine_id: &str) -> Result<Vec<RecipeRow>, RecipeError> {
    let machine = clean_machine_id(machine_id);
    let path = recipe_path(recipe_dir, &machine);

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RecipeError::NotFound {
                machine,
                path: path.display().to_string(),
            });
        }
        Err(e) => {
            return Err(RecipeError::Unreadable {
                machine,
                reason: e.to_string(),
            });
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| RecipeError::Unreadable {
        machine: machine.clone(),
        reason: format!("not UTF-8: {}", e),
    })?;

    parse_recipe_rows(&text).map_err(|reason| RecipeError::Unreadable { machine, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_path_sanitizes_machine() {
        let dir = Path::new("recipe");
        assert_eq!(recipe_path(dir, "A"), PathBuf::from("recipe/A_Recipe.csv"));
        assert_eq!(
            recipe_path(dir, "uploads\\B"),
            PathBuf::from("recipe/B_Recipe.csv")
        );
    }

    #[test]
    fn test_parse_korean_headers() {
        let text = "제품명,원료명,원두 글라인딩 양,1번 파우더량(S),2번 파우더량(S),시럽량(S)\n\
                    HOT 라떼,\"원두, 밀크 파우더\",18,5,5,\n\
                    ,물,0,0,0,0\n\
                    레몬에이드,레몬 시럽,,,,\"2,5\"\n";
        let rows = parse_recipe_rows(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "HOT 라떼");
        assert_eq!(rows[0].ingredients.as_deref(), Some("원두, 밀크 파우더"));
        assert_eq!(rows[0].bean, Some(18.0));
        assert_eq!(rows[0].powder1_seconds, Some(5.0));
        assert_eq!(rows[0].syrup_seconds, None);
        assert_eq!(rows[1].syrup_seconds, Some(2.5));
        assert_eq!(rows[1].bean, None);
    }

    #[test]
    fn test_parse_english_headers() {
        let text = "Product Name,Ingredients,Bean,Powder1,Powder2,Syrup\nLatte,밀크 파우더,18,5,5,0\n";
        let rows = parse_recipe_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].powder2_seconds, Some(5.0));
    }

    #[test]
    fn test_missing_product_column_is_unreadable() {
        assert!(parse_recipe_rows("Name,Bean\nLatte,18\n").is_err());
    }

    #[test]
    fn test_read_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        match read_recipe_rows(dir.path(), "Z") {
            Err(RecipeError::NotFound { machine, .. }) => assert_eq!(machine, "Z"),
            other => panic!("expected NotFound, got {:?}", other),
        }

        std::fs::write(
            dir.path().join("A_Recipe.csv"),
            "제품명,원료명\n라떼,밀크 파우더\n",
        )
        .unwrap();
        let rows = read_recipe_rows(dir.path(), "data/A").unwrap();
        assert_eq!(rows.len(), 1);

        std::fs::write(dir.path().join("C_Recipe.csv"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            read_recipe_rows(dir.path(), "C"),
            Err(RecipeError::Unreadable { .. })
        ));
    }
}
