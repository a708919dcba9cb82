use std::path::{Path, PathBuf};

use i18n_export::{
    CONFIG_KEY, ConfigDocument, Error, ExportFilesConfig, ExportFilesPlugin, PluginRegistry, plan,
};
use serde::Serialize;

/// Root keys the host configuration defines on its own.
pub const HOST_ROOT_KEYS: [&str; 4] = ["translations", "check", "lint_translations", "lint_scripts"];

/// Registry with the host keys and every bundled plugin.
pub fn build_registry() -> Result<PluginRegistry, Error> {
    let mut registry = PluginRegistry::new().with_host_keys(HOST_ROOT_KEYS);
    registry.register(ExportFilesPlugin::new())?;
    Ok(registry)
}

/// Reads a configuration file and validates it against every plugin.
pub fn load_config(registry: &PluginRegistry, path: &Path) -> Result<ConfigDocument, Error> {
    let config = ConfigDocument::read_from(path)?;
    registry.validate_schema(&config)?;
    tracing::debug!(config = %path.display(), "configuration is valid");
    Ok(config)
}

/// One planned rendering, as printed by `plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    pub file: PathBuf,
    pub template: PathBuf,
    pub output: String,
}

/// The renderings `export` would perform, without touching the filesystem.
/// Empty when the plugin is absent or disabled.
pub fn plan_rows(config: &ConfigDocument, files: &[PathBuf]) -> Result<Vec<PlanRow>, Error> {
    let Some(settings) = ExportFilesConfig::from_document(config)? else {
        return Ok(Vec::new());
    };
    if !settings.is_enabled() {
        return Ok(Vec::new());
    }

    Ok(plan(files, &settings.files)
        .into_iter()
        .map(|task| PlanRow {
            file: task.file.to_path_buf(),
            template: task.entry.template.clone(),
            output: task.entry.output.clone(),
        })
        .collect())
}

/// Whether the configuration turns `export_files` on.
pub fn export_enabled(config: &ConfigDocument) -> bool {
    config
        .dig(&[CONFIG_KEY, "enabled"])
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("i18n.yml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_registry_accepts_host_keys() {
        let registry = build_registry().unwrap();
        let keys: Vec<&str> = registry.root_keys().collect();
        assert_eq!(
            keys,
            vec![
                "translations",
                "check",
                "lint_translations",
                "lint_scripts",
                "export_files"
            ]
        );
    }

    #[test]
    fn test_load_config_validates() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "export_files:\n  enabled: true\n  files: []\n");
        let err = load_config(&build_registry().unwrap(), &path).unwrap_err();
        assert!(err.to_string().contains("to have at least one item"));
    }

    #[test]
    fn test_plan_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "export_files:\n  enabled: true\n  files:\n    - template: a.tera\n      output: \"%{base_name}.js\"\n",
        );
        let config = load_config(&build_registry().unwrap(), &path).unwrap();
        assert!(export_enabled(&config));

        let rows = plan_rows(&config, &[PathBuf::from("en.json"), PathBuf::from("fr.json")]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            PlanRow {
                file: PathBuf::from("fr.json"),
                template: PathBuf::from("a.tera"),
                output: "%{base_name}.js".to_string(),
            }
        );
    }

    #[test]
    fn test_plan_rows_disabled() {
        let config = ConfigDocument::from_yaml_str(
            "export_files:\n  enabled: false\n  files:\n    - template: a.tera\n      output: a.js\n",
        )
        .unwrap();
        assert!(!export_enabled(&config));
        assert!(plan_rows(&config, &[PathBuf::from("en.json")]).unwrap().is_empty());
    }
}
