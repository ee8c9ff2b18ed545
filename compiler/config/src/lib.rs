#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! cdpgen configuration.
//!
//! This crate provides the generation settings consumed by the code
//! generator: where template files live and which template renders
//! which unit of the protocol (domain, type, command, or event) into
//! which output path.
//!
//! Settings are stored in TOML format and can be loaded from files or
//! created with defaults matching the templates shipped in the
//! repository's `templates/` directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read settings file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML settings file.
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize settings to TOML format.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The unit of the protocol a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Rendered once per domain, with the domain as the model.
    Domain,
    /// Rendered once per named type definition.
    Type,
    /// Rendered once per command.
    Command,
    /// Rendered once per event.
    Event,
}

/// One configured template: which unit kind it renders, where the
/// template file lives, and the output path rule.
///
/// The output rule may use `{domain}` and `{name}` placeholders, which
/// are replaced with normalized identifier forms of the current domain
/// and unit names. The configuration must keep output paths unique
/// across templates; the generator rejects collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSettings {
    /// Which protocol unit this template renders.
    pub kind: UnitKind,
    /// Template path, resolved against the templates root unless absolute.
    pub template: String,
    /// Relative output path rule with `{domain}`/`{name}` placeholders.
    pub output: String,
}

/// Generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory containing template files.
    pub templates_root: PathBuf,
    /// The configured templates, applied in order per domain.
    #[serde(default)]
    pub templates: Vec<TemplateSettings>,
}

impl Settings {
    /// Load settings from a TOML file at `path`.
    ///
    /// A relative `templates_root` is resolved against the settings
    /// file's directory, so a settings file can be invoked from any
    /// working directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Settings = toml::from_str(&contents)?;
        if settings.templates_root.is_relative() {
            if let Some(parent) = path.as_ref().parent() {
                settings.templates_root = parent.join(&settings.templates_root);
            }
        }
        Ok(settings)
    }

    /// Save these settings as a pretty-printed TOML file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The templates configured for a given unit kind, in order.
    pub fn templates_for(&self, kind: UnitKind) -> impl Iterator<Item = &TemplateSettings> {
        self.templates.iter().filter(move |t| t.kind == kind)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_root: PathBuf::from("templates"),
            templates: vec![
                TemplateSettings {
                    kind: UnitKind::Domain,
                    template: "domain.hbs".to_string(),
                    output: "{domain}/mod.rs".to_string(),
                },
                TemplateSettings {
                    kind: UnitKind::Type,
                    template: "type.hbs".to_string(),
                    output: "{domain}/types/{name}.rs".to_string(),
                },
                TemplateSettings {
                    kind: UnitKind::Command,
                    template: "command.hbs".to_string(),
                    output: "{domain}/commands/{name}.rs".to_string(),
                },
                TemplateSettings {
                    kind: UnitKind::Event,
                    template: "event.hbs".to_string(),
                    output: "{domain}/events/{name}.rs".to_string(),
                },
            ],
        }
    }
}
