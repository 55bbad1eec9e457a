use serde::{Deserialize, Serialize};

/// Rendering options for a translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Target language for glosses; atoms without it fall back to the
    /// vocabulary's default language
    pub language: String,

    /// Glyph rendered for a mid-stream `.` separator
    pub separator_glyph: String,

    /// Prefix decoded output with `(<type label>)` when a type sigil leads
    pub emit_type_label: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            separator_glyph: "·".to_string(),
            emit_type_label: true,
        }
    }
}

impl TranslatorConfig {
    /// Default rendering in another gloss language
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Bare senses without the message-type label
    pub fn plain() -> Self {
        Self {
            emit_type_label: false,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        if self.separator_glyph.is_empty() {
            return Err("separator_glyph must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(TranslatorConfig::default().validate().is_ok());
        assert!(TranslatorConfig::plain().validate().is_ok());
        assert_eq!(TranslatorConfig::for_language("zh").language, "zh");
    }

    #[test]
    fn rejects_empty_fields() {
        let config = TranslatorConfig::for_language(" ");
        assert!(config.validate().is_err());

        let config = TranslatorConfig {
            separator_glyph: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: TranslatorConfig =
            serde_json::from_str(r#"{ "emit_type_label": false }"#).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.separator_glyph, "·");
        assert!(!config.emit_type_label);
    }
}
