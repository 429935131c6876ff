//! Engine configuration.

use smol_str::SmolStr;

/// Marker types that identify a generated backing field by default.
pub const DEFAULT_BACKING_FIELD_TYPES: &[&str] = &["BindableProperty", "DependencyProperty"];

/// Suffix appended to a property name to form its backing field name.
pub const DEFAULT_BACKING_FIELD_SUFFIX: &str = "Property";

/// Configuration for the rename engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Simple names of the declared types that mark a backing field
    pub backing_field_types: Vec<SmolStr>,
    /// Suffix of a backing field name (`Color` -> `ColorProperty`)
    pub backing_field_suffix: SmolStr,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backing_field_types: DEFAULT_BACKING_FIELD_TYPES
                .iter()
                .map(|name| SmolStr::new(name))
                .collect(),
            backing_field_suffix: SmolStr::new(DEFAULT_BACKING_FIELD_SUFFIX),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// `SYMRENAME_BACKING_TYPES` is a comma separated list of marker type
    /// names; `SYMRENAME_BACKING_SUFFIX` replaces the field suffix.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(types) = lookup("SYMRENAME_BACKING_TYPES") {
            let types: Vec<SmolStr> = types
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(SmolStr::new)
                .collect();
            if !types.is_empty() {
                config.backing_field_types = types;
            }
        }

        if let Some(suffix) = lookup("SYMRENAME_BACKING_SUFFIX") {
            let suffix = suffix.trim();
            if !suffix.is_empty() {
                config.backing_field_suffix = SmolStr::new(suffix);
            }
        }

        config
    }

    /// Whether a declared type name marks a backing field.
    pub fn is_backing_field_type(&self, simple_name: &str) -> bool {
        self.backing_field_types.iter().any(|ty| ty == simple_name)
    }

    /// Create a builder for configuration.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for engine configuration.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Replace the marker type list.
    pub fn backing_field_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.backing_field_types = types
            .into_iter()
            .map(|ty| SmolStr::new(ty.as_ref()))
            .collect();
        self
    }

    pub fn add_backing_field_type(mut self, ty: impl AsRef<str>) -> Self {
        self.config.backing_field_types.push(SmolStr::new(ty.as_ref()));
        self
    }

    pub fn backing_field_suffix(mut self, suffix: impl AsRef<str>) -> Self {
        self.config.backing_field_suffix = SmolStr::new(suffix.as_ref());
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = EngineConfig::default();
        assert!(config.is_backing_field_type("BindableProperty"));
        assert!(config.is_backing_field_type("DependencyProperty"));
        assert!(!config.is_backing_field_type("PropertyInfo"));
        assert_eq!(config.backing_field_suffix, "Property");
    }

    #[test]
    fn test_from_lookup() {
        let config = EngineConfig::from_lookup(|key| match key {
            "SYMRENAME_BACKING_TYPES" => Some(" StyledProperty , DirectProperty,".to_string()),
            "SYMRENAME_BACKING_SUFFIX" => Some("Field".to_string()),
            _ => None,
        });
        assert_eq!(config.backing_field_types, vec!["StyledProperty", "DirectProperty"]);
        assert_eq!(config.backing_field_suffix, "Field");
    }

    #[test]
    fn test_from_lookup_ignores_empty_values() {
        let config = EngineConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::builder()
            .backing_field_types(["StyledProperty"])
            .add_backing_field_type("AttachedProperty")
            .backing_field_suffix("Prop")
            .build();
        assert!(config.is_backing_field_type("AttachedProperty"));
        assert!(!config.is_backing_field_type("BindableProperty"));
        assert_eq!(config.backing_field_suffix, "Prop");
    }
}
