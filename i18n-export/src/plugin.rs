//! Plugin lifecycle hooks and the registry that dispatches them.

use std::path::PathBuf;

use crate::{config::ConfigDocument, error::Error, schema};

/// A post-export plugin owning one root key of the configuration document.
///
/// # Example
///
/// ```rust
/// use i18n_export::{ConfigDocument, ExportFilesPlugin, PluginRegistry};
///
/// let mut registry = PluginRegistry::new().with_host_keys(["translations"]);
/// registry.register(ExportFilesPlugin::new())?;
///
/// let config = ConfigDocument::from_yaml_str("translations: []\n")?;
/// registry.validate_schema(&config)?;
/// registry.after_export(&[], &config)?;
/// # Ok::<(), i18n_export::Error>(())
/// ```
pub trait Plugin {
    /// The reserved root key this plugin's settings live under.
    fn config_key(&self) -> &str;

    /// Validates this plugin's namespace. Called before any export happens.
    fn validate_schema(&self, config: &ConfigDocument) -> Result<(), Error>;

    /// Runs once per export batch, after the host wrote `files`.
    fn after_export(&self, files: &[PathBuf], config: &ConfigDocument) -> Result<(), Error>;
}

/// Registered plugins plus the root keys the host itself understands.
#[derive(Default)]
pub struct PluginRegistry {
    host_keys: Vec<String>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry with no host keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares root keys owned by the host rather than by a plugin.
    pub fn with_host_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Registers a plugin. Fails if its key is already taken by the host or
    /// another plugin.
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), Error> {
        let key = plugin.config_key();
        if self.root_keys().any(|existing| existing == key) {
            return Err(Error::DuplicateConfigKey(key.to_string()));
        }
        self.plugins.push(Box::new(plugin));
        Ok(())
    }

    /// Every accepted root key: host keys first, then plugin keys in
    /// registration order.
    pub fn root_keys(&self) -> impl Iterator<Item = &str> {
        self.host_keys
            .iter()
            .map(String::as_str)
            .chain(self.plugins.iter().map(|plugin| plugin.config_key()))
    }

    /// Registered plugins in registration order.
    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    /// Rejects unknown root keys, then lets each plugin validate its own
    /// namespace. Stops at the first violation.
    pub fn validate_schema(&self, config: &ConfigDocument) -> Result<(), Error> {
        let allowed: Vec<&str> = self.root_keys().collect();
        schema::reject_extraneous_keys(&allowed, config.root())?;

        for plugin in self.plugins() {
            tracing::debug!(plugin = plugin.config_key(), "validating plugin schema");
            plugin.validate_schema(config)?;
        }
        Ok(())
    }

    /// Runs every plugin's post-export hook in registration order.
    pub fn after_export(&self, files: &[PathBuf], config: &ConfigDocument) -> Result<(), Error> {
        for plugin in self.plugins() {
            tracing::debug!(plugin = plugin.config_key(), files = files.len(), "running after_export");
            plugin.after_export(files, config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        key: &'static str,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Plugin for Recording {
        fn config_key(&self) -> &str {
            self.key
        }

        fn validate_schema(&self, _config: &ConfigDocument) -> Result<(), Error> {
            self.calls.borrow_mut().push(format!("validate:{}", self.key));
            Ok(())
        }

        fn after_export(&self, files: &[PathBuf], _config: &ConfigDocument) -> Result<(), Error> {
            self.calls
                .borrow_mut()
                .push(format!("export:{}:{}", self.key, files.len()));
            Ok(())
        }
    }

    fn registry(calls: &Rc<RefCell<Vec<String>>>) -> PluginRegistry {
        let mut registry = PluginRegistry::new().with_host_keys(["translations"]);
        for key in ["first", "second"] {
            registry
                .register(Recording {
                    key,
                    calls: Rc::clone(calls),
                })
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_root_keys_compose_host_and_plugins() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = registry(&calls);
        let keys: Vec<&str> = registry.root_keys().collect();
        assert_eq!(keys, vec!["translations", "first", "second"]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = registry(&calls);
        let err = registry
            .register(Recording {
                key: "translations",
                calls: Rc::clone(&calls),
            })
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateConfigKey(key) if key == "translations"));
    }

    #[test]
    fn test_unknown_root_key_rejected() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = registry(&calls);
        let config = ConfigDocument::from_yaml_str("first: {}\nthird: {}\n").unwrap();
        let err = registry.validate_schema(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::UnknownKey { ref key, .. }) if key == "third"
        ));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = registry(&calls);
        let config = ConfigDocument::from_yaml_str("translations: []\n").unwrap();

        registry.validate_schema(&config).unwrap();
        registry
            .after_export(&[PathBuf::from("en.json")], &config)
            .unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                "validate:first",
                "validate:second",
                "export:first:1",
                "export:second:1"
            ]
        );
    }
}
