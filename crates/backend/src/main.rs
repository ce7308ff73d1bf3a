use backend::shared::config;
use backend::system::{console, run, tracing as app_tracing};

fn main() -> anyhow::Result<()> {
    app_tracing::initialize()?;

    let config = config::load_config()?;
    tracing::info!(
        "Data: {}, recipes: {}, output: {}",
        config.data_dir().display(),
        config.recipe_dir().display(),
        config.output_dir().display()
    );

    let output = run::run_report(&config)?;

    console::print_sales_dashboard(&output.dashboard);
    console::print_ingredient_summary(&output.ingredient_summary);

    if !output.diagnostics.warnings.is_empty() {
        println!("\n⚠️ 경고 {}건", output.diagnostics.warnings.len());
        for warning in &output.diagnostics.warnings {
            println!("  - {}", warning);
        }
    }

    if let Some(error) = &output.diagnostics.category_error {
        println!("\n⚠️ 카테고리 파일을 사용하지 않았습니다: {}", error);
    }

    println!("\n📥 생성된 파일:");
    for path in &output.written_files {
        println!("  {}", path.display());
    }

    Ok(())
}
