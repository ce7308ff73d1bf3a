use anyhow::Context;
use contracts::dashboards::d401_sales_overview::SalesFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "VENDING_CONFIG";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Folder with `<machine>_sales_<month>.csv` exports
    pub data_dir: String,
    /// Folder with `<machine>_Recipe.csv` tables
    pub recipe_dir: String,
    pub category_file: String,
    pub output_dir: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    /// Order month shown in the overview; latest month when absent
    pub month: Option<u32>,
    /// Machine code shown in the overview and ingredient summaries; all when absent
    pub machine: Option<String>,
}

impl ReportConfig {
    pub fn filter(&self) -> SalesFilter {
        SalesFilter {
            month: self.month,
            machine: self.machine.clone(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[paths]
data_dir = "data"
recipe_dir = "recipe"
category_file = "Vending_Machine_Category.csv"
output_dir = "target/reports"
"#;

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.resolve(&self.paths.data_dir)
    }

    pub fn recipe_dir(&self) -> PathBuf {
        self.resolve(&self.paths.recipe_dir)
    }

    pub fn category_file(&self) -> PathBuf {
        self.resolve(&self.paths.category_file)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.paths.output_dir)
    }

    /// Absolute paths are used as is, relative ones are joined to `base_dir`
    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}

/// Parses a config document; relative paths will resolve against `base_dir`
pub fn parse_config(contents: &str, base_dir: &Path) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.base_dir = base_dir.to_path_buf();
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. Path in the `VENDING_CONFIG` environment variable
/// 2. `config.toml` in the current directory
/// 3. `config.toml` next to the executable
/// 4. Embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        tracing::info!("Loading config from {}: {}", CONFIG_ENV, path.display());
        return load_config_file(&path);
    }

    let mut candidates = vec![PathBuf::from("config.toml")];
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }

    for path in candidates {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return load_config_file(&path);
        }
        tracing::debug!("config.toml not found at: {}", path.display());
    }

    tracing::info!("Using default embedded configuration");
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    parse_config(DEFAULT_CONFIG, &cwd)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;
    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir().context("Cannot determine current directory")?,
    };
    parse_config(&contents, &base_dir)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, Path::new("/srv/vending")).unwrap();
        assert_eq!(config.paths.recipe_dir, "recipe");
        assert_eq!(config.recipe_dir(), PathBuf::from("/srv/vending/recipe"));
        assert!(config.report.month.is_none());
        assert!(config.report.machine.is_none());
    }

    #[test]
    fn test_report_section_and_absolute_paths() {
        let text = r#"
[paths]
data_dir = "/data/sales"
recipe_dir = "recipes"
category_file = "cat.csv"
output_dir = "out"

[report]
month = 7
machine = "A"
"#;
        let config = parse_config(text, Path::new("/etc/vending")).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/data/sales"));
        assert_eq!(config.output_dir(), PathBuf::from("/etc/vending/out"));

        let filter = config.report.filter();
        assert_eq!(filter.month, Some(7));
        assert_eq!(filter.machine_code(), Some("A"));
    }

    #[test]
    fn test_missing_paths_section_fails() {
        assert!(parse_config("[report]\nmonth = 1\n", Path::new(".")).is_err());
    }

    #[test]
    fn test_load_config_file_resolves_next_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, DEFAULT_CONFIG).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.data_dir(), dir.path().join("data"));
    }
}
