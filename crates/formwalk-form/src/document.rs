//! # Document — Declarative Form Files
//!
//! Forms can be written as YAML or JSON instead of Rust:
//!
//! ```yaml
//! name: signup
//! fields:
//!   "signup[email]":
//!     - rule: presence
//!     - rule: email
//!   "signup[age]": { rule: numericality, only_integer: true, greater_than: 17 }
//!   "signup[tags][]": { rule: length, maximum: 20 }
//!   signup:
//!     address:
//!       city: { rule: presence }
//! ```
//!
//! Each value under `fields` is one of:
//!
//! - a **rule**: a mapping with a `rule` key plus any
//!   [`ValidationOptions`] fields;
//! - a **list of rules**, all applied to the same field;
//! - a **mapping of sub-fields**, nested under the key.
//!
//! Keys are bracket paths and may nest several levels at once. Fields are
//! visited in key order.
//!
//! ## Rules
//!
//! | rule | keys besides `rule` |
//! |------|---------------------|
//! | `anything` | none |
//! | `presence`, `url`, `email` | `optional`, `message` |
//! | `acceptance` | `optional`, `message`, `accept` |
//! | `length` | `optional`, `message`, `is`, `minimum` (`min`), `maximum` (`max`) |
//! | `numericality` | `optional`, `message`, `only_integer`, `even`, `odd` and the comparison bounds |
//! | `format` | `optional`, `message`, `pattern` |
//! | `confirmation` | `optional`, `message`, `field`: the path of the field to match, without `[]` |
//! | `inclusion`, `exclusion` | `optional`, `message`, `in`: list of strings |
//!
//! Building fails with a [`SchemaError`] naming the field path when a rule
//! is unknown, a parameter is missing, a key is misspelled or does not
//! apply to the rule, or the options are inconsistent.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use formwalk_core::{FieldPath, FormwalkError, SchemaError};
use formwalk_validation::{
    acceptance, anything, confirmation_of, email, exclusion, format, inclusion, length,
    numericality, presence, url, ValidationOptions, Validator,
};

use crate::schema::{Branch, Schema, ValidationNode};
use crate::session::Form;

/// A form as written in a YAML or JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDecl>,
}

/// What a field key maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDecl {
    Rule(RuleDecl),
    Rules(Vec<RuleDecl>),
    Branch(BTreeMap<String, FieldDecl>),
}

/// One validator, by rule name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDecl {
    pub rule: String,
    /// Regular expression for `format`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Field to match, for `confirmation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Allowed or forbidden values, for `inclusion` and `exclusion`.
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: ValidationOptions,
    /// Keys no rule understands. Rejected by [`RuleDecl::build`].
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

const COMMON_KEYS: &[&str] = &["optional", "message"];

/// Keys `rule` understands besides the common ones, or `None` for an
/// unknown rule.
fn rule_keys(rule: &str) -> Option<&'static [&'static str]> {
    let keys: &'static [&'static str] = match rule {
        "anything" | "presence" | "url" | "email" => &[],
        "acceptance" => &["accept"],
        "length" => &["is", "minimum", "maximum"],
        "numericality" => &[
            "only_integer",
            "even",
            "odd",
            "equal_to",
            "less_than",
            "less_than_or_equal_to",
            "greater_than",
            "greater_than_or_equal_to",
        ],
        "format" => &["pattern"],
        "confirmation" => &["field"],
        "inclusion" | "exclusion" => &["in"],
        _ => return None,
    };
    Some(keys)
}

impl RuleDecl {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            pattern: None,
            field: None,
            list: None,
            options: ValidationOptions::default(),
            unknown: BTreeMap::new(),
        }
    }

    /// Build the validator this rule names.
    pub fn build(&self) -> Result<Validator, SchemaError> {
        self.check_keys()?;
        let options = self.options.clone();
        match self.rule.as_str() {
            "anything" => Ok(anything()),
            "presence" => Ok(presence(options)),
            "acceptance" => Ok(acceptance(options)),
            "length" => length(options),
            "numericality" => numericality(options),
            "url" => Ok(url(options)),
            "email" => Ok(email(options)),
            "format" => {
                let pattern = self.require(&self.pattern, "pattern")?;
                format(pattern, options)
            }
            "confirmation" => {
                let field = FieldPath::parse(self.require(&self.field, "field")?);
                if field.has_wildcard() {
                    return Err(SchemaError::invalid_option(
                        "confirmation",
                        format!("field '{field}' must not contain a wildcard"),
                    ));
                }
                Ok(confirmation_of(field, options))
            }
            "inclusion" => Ok(inclusion(self.require(&self.list, "in")?.clone(), options)),
            "exclusion" => Ok(exclusion(self.require(&self.list, "in")?.clone(), options)),
            other => Err(SchemaError::UnknownRule(other.to_string())),
        }
    }

    /// Reject misspelled keys and keys the rule would ignore.
    fn check_keys(&self) -> Result<(), SchemaError> {
        let Some(accepted) = rule_keys(&self.rule) else {
            return Err(SchemaError::UnknownRule(self.rule.clone()));
        };
        if let Some(key) = self.unknown.keys().next() {
            return Err(SchemaError::invalid_option(&self.rule, format!("unknown key '{key}'")));
        }
        let common: &[&str] = if self.rule == "anything" { &[] } else { COMMON_KEYS };
        match self
            .keys_in_use()
            .into_iter()
            .find(|key| !accepted.contains(key) && !common.contains(key))
        {
            Some(key) => Err(SchemaError::invalid_option(
                &self.rule,
                format!("'{key}' does not apply to {}", self.rule),
            )),
            None => Ok(()),
        }
    }

    /// Every known key this declaration sets.
    fn keys_in_use(&self) -> Vec<&'static str> {
        let o = &self.options;
        [
            ("optional", o.optional),
            ("message", o.message.is_some()),
            ("is", o.is.is_some()),
            ("minimum", o.minimum.is_some()),
            ("maximum", o.maximum.is_some()),
            ("only_integer", o.only_integer),
            ("even", o.even),
            ("odd", o.odd),
            ("equal_to", o.equal_to.is_some()),
            ("less_than", o.less_than.is_some()),
            ("less_than_or_equal_to", o.less_than_or_equal_to.is_some()),
            ("greater_than", o.greater_than.is_some()),
            ("greater_than_or_equal_to", o.greater_than_or_equal_to.is_some()),
            ("accept", o.accept.is_some()),
            ("pattern", self.pattern.is_some()),
            ("field", self.field.is_some()),
            ("in", self.list.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, set)| set.then_some(key))
        .collect()
    }

    fn require<'a, T>(&self, value: &'a Option<T>, parameter: &str) -> Result<&'a T, SchemaError> {
        value
            .as_ref()
            .ok_or_else(|| SchemaError::missing_parameter(&self.rule, parameter))
    }
}

impl FieldDecl {
    /// Build the node for the field at `path` (used for error reporting).
    pub fn build(&self, path: &FieldPath) -> Result<ValidationNode, SchemaError> {
        let at = |e: SchemaError| e.at_field(path.to_string());
        match self {
            FieldDecl::Rule(rule) => rule.build().map(ValidationNode::Leaf).map_err(at),
            FieldDecl::Rules(rules) => rules
                .iter()
                .map(RuleDecl::build)
                .collect::<Result<Vec<_>, _>>()
                .map(ValidationNode::LeafList)
                .map_err(at),
            FieldDecl::Branch(fields) => build_branch(fields, path).map(ValidationNode::Branch),
        }
    }
}

fn build_branch(fields: &BTreeMap<String, FieldDecl>, base: &FieldPath) -> Result<Branch, SchemaError> {
    let mut branch = Branch::new();
    for (key, decl) in fields {
        let relative = FieldPath::parse(key);
        if relative.is_empty() {
            return Err(SchemaError::Malformed("empty field name".into()).at_field(base.to_string()));
        }
        let node = decl.build(&base.join(&relative))?;
        branch.insert(&relative, node);
    }
    Ok(branch)
}

impl FormDocument {
    /// Build the schema described by `fields`.
    pub fn schema(&self) -> Result<Schema, SchemaError> {
        build_branch(&self.fields, &FieldPath::root()).map(Schema::from)
    }

    /// Build a ready-to-use [`Form`].
    pub fn build(&self) -> Result<Form, SchemaError> {
        let schema = self.schema()?;
        tracing::debug!(form = %self.name, fields = schema.field_count(), "built form from document");
        Ok(Form::new(self.name.clone(), schema))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, FormwalkError> {
        serde_yaml::from_str(source).map_err(|e| load_error("<yaml>", e))
    }

    pub fn from_json_str(source: &str) -> Result<Self, FormwalkError> {
        serde_json::from_str(source).map_err(|e| load_error("<json>", e))
    }

    /// Read a form file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormwalkError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| load_error(&display, e))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&source).map_err(|e| load_error(&display, e))
        } else {
            serde_yaml::from_str(&source).map_err(|e| load_error(&display, e))
        }
    }
}

fn load_error(path: &str, reason: impl std::fmt::Display) -> FormwalkError {
    FormwalkError::Load {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwalk_core::{ErrorIndicator, FormInput};
    use formwalk_validation::messages;

    use crate::session::FormSession;

    const SIGNUP: &str = r#"
name: signup
fields:
  "signup[email]":
    - rule: presence
    - rule: email
  "signup[age]": { rule: numericality, only_integer: true, greater_than: 17 }
  "signup[tags][]": { rule: length, maximum: 5, message: too long }
  "signup[password]": { rule: length, min: 8 }
  "signup[confirm]": { rule: confirmation, field: "signup[password]" }
  signup:
    plan: { rule: inclusion, in: [free, pro] }
    address:
      city: { rule: presence, message: 12 }
"#;

    fn form() -> Form {
        FormDocument::from_yaml_str(SIGNUP).unwrap().build().unwrap()
    }

    #[test]
    fn parses_all_declaration_shapes() {
        let doc = FormDocument::from_yaml_str(SIGNUP).unwrap();
        assert_eq!(doc.name, "signup");
        assert!(matches!(doc.fields["signup[email]"], FieldDecl::Rules(ref r) if r.len() == 2));
        assert!(matches!(doc.fields["signup[age]"], FieldDecl::Rule(_)));
        assert!(matches!(doc.fields["signup"], FieldDecl::Branch(_)));
        match &doc.fields["signup[password]"] {
            FieldDecl::Rule(rule) => assert_eq!(rule.options.minimum, Some(8)),
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn built_form_validates() {
        let mut session = FormSession::new(form());
        let input = FormInput::from_pairs([
            ("signup[email]", "ada@example.com"),
            ("signup[age]", "36"),
            ("signup[tags][0]", "math"),
            ("signup[password]", "analytical"),
            ("signup[confirm]", "analytical"),
            ("signup[plan]", "pro"),
            ("signup[address][city]", "London"),
        ]);
        assert!(session.validate(input).is_some(), "{:?}", session.errors());
    }

    #[test]
    fn built_form_reports_each_field() {
        let mut session = FormSession::new(form());
        let input = FormInput::from_pairs([
            ("signup[email]", "not-an-address"),
            ("signup[age]", "12"),
            ("signup[tags][0]", "much too long"),
            ("signup[password]", "short"),
            ("signup[confirm]", "other"),
            ("signup[plan]", "enterprise"),
        ]);
        assert!(session.validate(input).is_none());
        assert_eq!(session.error_for("signup[email]"), &[ErrorIndicator::message(messages::NOT_AN_EMAIL)]);
        assert_eq!(
            session.error_for("signup[age]"),
            &[ErrorIndicator::Message(messages::greater_than(17.0))]
        );
        assert_eq!(session.error_for("signup[tags][0]"), &[ErrorIndicator::message("too long")]);
        assert!(session.has_error("signup[password]"));
        assert!(session.has_error("signup[confirm]"));
        assert!(session.has_error_code("signup[plan]", &ErrorIndicator::message(messages::INCLUSION)));
        assert!(session.has_error_code("signup[address][city]", &ErrorIndicator::Code(12)));
    }

    #[test]
    fn json_documents_are_equivalent() {
        let json = r#"{"name": "n", "fields": {"a": {"rule": "presence"}, "b": [{"rule": "url", "optional": true}]}}"#;
        let doc = FormDocument::from_json_str(json).unwrap();
        let schema = doc.schema().unwrap();
        assert_eq!(schema.field_count(), 2);
    }

    #[test]
    fn unknown_rule_names_the_field() {
        let doc = FormDocument::from_yaml_str("name: x\nfields:\n  user:\n    name: { rule: sparkly }\n").unwrap();
        let err = doc.build().unwrap_err();
        assert_eq!(err.to_string(), "field 'user[name]': unknown rule 'sparkly'");
    }

    #[test]
    fn missing_parameters_are_reported() {
        let doc = FormDocument::from_yaml_str("name: x\nfields:\n  code: { rule: format }\n").unwrap();
        assert!(matches!(
            doc.build().unwrap_err(),
            SchemaError::AtField { ref source, .. }
                if matches!(**source, SchemaError::MissingParameter { ref parameter, .. } if parameter == "pattern")
        ));
    }

    #[test]
    fn inconsistent_options_are_reported() {
        let doc = FormDocument::from_yaml_str("name: x\nfields:\n  n: { rule: length, minimum: 9, maximum: 2 }\n").unwrap();
        assert!(doc.build().is_err());
        let doc = FormDocument::from_yaml_str("name: x\nfields:\n  p: { rule: format, pattern: \"(\" }\n").unwrap();
        assert!(doc.build().is_err());
    }

    fn build_error(yaml: &str) -> String {
        FormDocument::from_yaml_str(yaml).unwrap().build().unwrap_err().to_string()
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        assert_eq!(
            build_error("name: x\nfields:\n  n: { rule: length, minimun: 3 }\n"),
            "field 'n': invalid options for length: unknown key 'minimun'"
        );
        assert_eq!(
            build_error("name: x\nfields:\n  a: [{ rule: presence }, { rule: email, optonal: true }]\n"),
            "field 'a': invalid options for email: unknown key 'optonal'"
        );
    }

    #[test]
    fn keys_for_other_rules_are_rejected() {
        assert_eq!(
            build_error("name: x\nfields:\n  n: { rule: presence, pattern: \"^a\" }\n"),
            "field 'n': invalid options for presence: 'pattern' does not apply to presence"
        );
        assert_eq!(
            build_error("name: x\nfields:\n  n: { rule: length, greater_than: 3 }\n"),
            "field 'n': invalid options for length: 'greater_than' does not apply to length"
        );
        assert!(FormDocument::from_yaml_str("name: x\nfields:\n  n: { rule: anything, message: hi }\n")
            .unwrap()
            .build()
            .is_err());
    }

    #[test]
    fn confirmation_field_cannot_be_a_wildcard() {
        assert_eq!(
            build_error("name: x\nfields:\n  \"rows[][confirm]\": { rule: confirmation, field: \"rows[][password]\" }\n"),
            "field 'rows[][confirm]': invalid options for confirmation: field 'rows[][password]' must not contain a wildcard"
        );
    }

    #[test]
    fn load_reads_files_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("form.yaml");
        std::fs::write(&yaml, SIGNUP).unwrap();
        assert_eq!(FormDocument::load(&yaml).unwrap().name, "signup");

        let json = dir.path().join("form.json");
        std::fs::write(&json, r#"{"name": "j", "fields": {}}"#).unwrap();
        assert_eq!(FormDocument::load(&json).unwrap().name, "j");

        let err = FormDocument::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, FormwalkError::Load { .. }));
    }

    #[test]
    fn rule_decl_builds_directly() {
        let mut rule = RuleDecl::new("exclusion");
        rule.list = Some(vec!["root".into()]);
        let v = rule.build().unwrap();
        assert!(v.check("root").is_err());
        assert!(v.check("ada").is_ok());
    }
}
