/// Machine and month encoded in a sales export file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesFileName {
    pub machine: String,
    pub month: u32,
}

/// Parses `<machine>_sales_<month>.csv` (`A_sales_007.csv` -> A, 7).
/// Returns None for any other name.
pub fn parse_sales_file_name(file_name: &str) -> Option<SalesFileName> {
    let stem = file_name
        .strip_suffix(".csv")
        .or_else(|| file_name.strip_suffix(".CSV"))?;
    let (machine, month) = stem.split_once("_sales_")?;

    let machine = machine.trim();
    if machine.is_empty() {
        return None;
    }

    let month = month.trim().parse::<u32>().ok()?;
    Some(SalesFileName {
        machine: machine.to_string(),
        month,
    })
}
