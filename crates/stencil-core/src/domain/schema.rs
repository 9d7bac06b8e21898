//! Parameter schemas and resolved parameter sets.
//!
//! A bundle declares *what* it needs via [`ParameterSchema`]; the application
//! layer decides *how* values are collected (flags, prompts, defaults). The
//! scaffolding engine only ever sees a [`ResolvedParameters`] that already
//! satisfies the schema, which keeps rendering pure.

use crate::domain::error::DomainError;

// ============================================================================
// Parameter Specification
// ============================================================================

/// Validation rule attached to a parameter.
///
/// ## Design Note
///
/// A closed enum instead of arbitrary predicates keeps rules serializable
/// (bundle manifests name them by string) and keeps validation deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Value must contain at least one non-whitespace character.
    NonEmpty,
    /// Value must be usable as an identifier or package name:
    /// ASCII alphanumerics, `-` and `_`, starting with a letter.
    Slug,
    /// Dotted version number, e.g. `3.12` or `1.0.0`.
    Version,
    /// Value must be one of the listed alternatives.
    OneOf(Vec<String>),
}

impl ValidationRule {
    /// Check a candidate value, returning the rejection reason on failure.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Self::NonEmpty => {
                if value.trim().is_empty() {
                    Err("value cannot be empty".into())
                } else {
                    Ok(())
                }
            }
            Self::Slug => {
                let mut chars = value.chars();
                let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
                let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                if head_ok && tail_ok {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' is not a valid name (letters, digits, '-', '_'; must start with a letter)",
                        value
                    ))
                }
            }
            Self::Version => {
                let ok = !value.is_empty()
                    && value
                        .split('.')
                        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
                if ok {
                    Ok(())
                } else {
                    Err(format!("'{}' is not a version number like 3.12", value))
                }
            }
            Self::OneOf(options) => {
                if options.iter().any(|o| o == value) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not one of: {}", value, options.join(", ")))
                }
            }
        }
    }
}

/// A single named parameter a bundle requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Unique key within the schema (also the placeholder name in templates).
    pub name: String,
    /// Human-readable prompt/description.
    pub description: String,
    /// Value used when the parameter is neither provided nor prompted for.
    pub default: Option<String>,
    /// Rule every accepted value must satisfy.
    pub rule: ValidationRule,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, rule: ValidationRule) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
            rule,
        }
    }

    /// Attach a default value (builder style).
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Validate a candidate value against this spec's rule.
    pub fn validate(&self, value: &str) -> Result<(), DomainError> {
        self.rule
            .check(value)
            .map_err(|reason| DomainError::InvalidParameter {
                name: self.name.clone(),
                reason,
            })
    }
}

// ============================================================================
// Parameter Schema
// ============================================================================

/// Ordered set of parameter specs for one bundle.
///
/// Order matters: prompts appear in declaration order, and resolution
/// processes specs front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    specs: Vec<ParameterSpec>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec (builder style).
    pub fn with(mut self, spec: ParameterSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Look up a spec by parameter name.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Invariant check: parameter names must be unique and slug-shaped.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = std::collections::HashSet::new();
        for spec in &self.specs {
            if spec.name.is_empty()
                || !spec
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(DomainError::InvalidBundle(format!(
                    "parameter name '{}' must be alphanumeric/underscore",
                    spec.name
                )));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(DomainError::DuplicateParameter {
                    name: spec.name.clone(),
                });
            }
            // A declared default that fails its own rule is an authoring bug.
            if let Some(default) = &spec.default {
                spec.validate(default)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Resolved Parameters
// ============================================================================

/// Complete, validated parameter set handed to the scaffolding engine.
///
/// ## Derived Variables
///
/// For every parameter `p` three casing variants are derived at insertion
/// time so templates can pick the convention they need:
///
/// | Key | Example |
/// |-----|---------|
/// | `p` | "My App" |
/// | `p_snake` | "my_app" |
/// | `p_kebab` | "my-app" |
/// | `p_pascal` | "MyApp" |
///
/// Derivation happens once at construction; lookup during rendering is a
/// plain map read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedParameters {
    /// Declaration-ordered (name, value) pairs, derived variants included.
    /// A Vec keeps ordering stable for display; linear lookup is fine for
    /// the handful of parameters a bundle carries.
    values: Vec<(String, String)>,
}

impl ResolvedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a validated value plus its derived casing variants.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.set(format!("{name}_snake"), to_snake_case(&value));
        self.set(format!("{name}_kebab"), to_kebab_case(&value));
        self.set(format!("{name}_pascal"), to_pascal_case(&value));
        self.set(name, value);
    }

    /// Raw insert without derivation (internal; also used for overrides).
    fn set(&mut self, name: String, value: String) {
        if let Some(slot) = self.values.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate pairs in insertion order (derived variants included).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to kebab-case. Same split as snake, joined with `-`.
fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into words based on casing and separators.
///
/// Boundaries: explicit separators (`_`, `-`, whitespace), camelCase
/// transitions (`aB`), and acronym edges (`HTTPServer` splits before
/// `Server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // camelCase transition: "myApp" -> "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Acronym edge: "HTTPServer" -> "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rule_rejects_whitespace() {
        assert!(ValidationRule::NonEmpty.check("   ").is_err());
        assert!(ValidationRule::NonEmpty.check("x").is_ok());
    }

    #[test]
    fn slug_rule() {
        assert!(ValidationRule::Slug.check("my-project_2").is_ok());
        assert!(ValidationRule::Slug.check("2fast").is_err());
        assert!(ValidationRule::Slug.check("has space").is_err());
        assert!(ValidationRule::Slug.check("").is_err());
    }

    #[test]
    fn version_rule() {
        assert!(ValidationRule::Version.check("3.12").is_ok());
        assert!(ValidationRule::Version.check("1.0.0").is_ok());
        assert!(ValidationRule::Version.check("v3").is_err());
        assert!(ValidationRule::Version.check("3.").is_err());
    }

    #[test]
    fn one_of_rule_lists_options_in_reason() {
        let rule = ValidationRule::OneOf(vec!["lib".into(), "app".into()]);
        assert!(rule.check("lib").is_ok());
        let reason = rule.check("gui").unwrap_err();
        assert!(reason.contains("lib, app"));
    }

    #[test]
    fn schema_rejects_duplicate_names() {
        let schema = ParameterSchema::new()
            .with(ParameterSpec::new("name", "Name", ValidationRule::NonEmpty))
            .with(ParameterSpec::new("name", "Again", ValidationRule::NonEmpty));
        assert!(matches!(
            schema.validate(),
            Err(DomainError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn schema_rejects_default_violating_rule() {
        let schema = ParameterSchema::new().with(
            ParameterSpec::new("layout", "Layout", ValidationRule::OneOf(vec!["lib".into()]))
                .with_default("gui"),
        );
        assert!(matches!(
            schema.validate(),
            Err(DomainError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn resolved_parameters_derive_casings() {
        let mut params = ResolvedParameters::new();
        params.insert("project_name", "My Awesome App");

        assert_eq!(params.get("project_name"), Some("My Awesome App"));
        assert_eq!(params.get("project_name_snake"), Some("my_awesome_app"));
        assert_eq!(params.get("project_name_kebab"), Some("my-awesome-app"));
        assert_eq!(params.get("project_name_pascal"), Some("MyAwesomeApp"));
    }

    #[test]
    fn resolved_parameters_insert_overrides() {
        let mut params = ResolvedParameters::new();
        params.insert("name", "first");
        params.insert("name", "second");
        assert_eq!(params.get("name"), Some("second"));
        assert_eq!(params.get("name_snake"), Some("second"));
    }

    #[test]
    fn case_conversion_handles_acronyms() {
        let mut params = ResolvedParameters::new();
        params.insert("p", "XMLHttpRequest");
        assert_eq!(params.get("p_snake"), Some("xml_http_request"));
        assert_eq!(params.get("p_pascal"), Some("XmlHttpRequest"));
    }
}
