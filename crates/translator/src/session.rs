use std::collections::HashMap;

use serde::Serialize;

/// Effect of a context switch or legacy block on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    /// `@*`
    ClearDomains,
    /// `@c`, `@cd`, `{ns:cd}`
    ActivateDomain { code: String },
    /// `{def:key=value}`
    Define { key: String, value: String },
}

/// Per-call translation state: the active-domain stack and local definitions.
///
/// Created for one translation call and dropped afterwards. Domains are kept
/// in activation order, which is also their lookup precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_domains: Vec<String>,
    definitions: HashMap<String, String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `code` unless already active. Returns whether it was added.
    pub fn activate(&mut self, code: &str) -> bool {
        if self.active_domains.iter().any(|active| active == code) {
            return false;
        }
        log::debug!("Activating domain '{code}'");
        self.active_domains.push(code.to_string());
        true
    }

    pub fn clear_domains(&mut self) {
        if !self.active_domains.is_empty() {
            log::debug!("Clearing active domains {:?}", self.active_domains);
        }
        self.active_domains.clear();
    }

    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        log::debug!("Defining '{key}' = '{value}'");
        self.definitions.insert(key, value);
    }

    #[must_use]
    pub fn definition(&self, key: &str) -> Option<&str> {
        self.definitions.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn active_domains(&self) -> &[String] {
        &self.active_domains
    }

    pub fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::ClearDomains => self.clear_domains(),
            Directive::ActivateDomain { code } => {
                self.activate(code);
            }
            Directive::Define { key, value } => self.define(key.as_str(), value.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn activation_keeps_order_without_duplicates() {
        let mut session = Session::new();
        assert!(session.activate("cd"));
        assert!(session.activate("sc"));
        assert!(!session.activate("cd"));
        assert_eq!(session.active_domains(), ["cd", "sc"]);

        session.apply(&Directive::ClearDomains);
        assert!(session.active_domains().is_empty());
    }

    #[test]
    fn definitions_replace_previous_values() {
        let mut session = Session::new();
        session.apply(&Directive::Define {
            key: "zz".to_string(),
            value: "first".to_string(),
        });
        session.define("zz", "second");
        assert_eq!(session.definition("zz"), Some("second"));
        assert_eq!(session.definition("yy"), None);
    }
}
