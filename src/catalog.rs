//! Fixed catalogues of the JDL: field validations, entity options and the
//! built-in entities the platform provides.

use crate::ast::JdlOption;
use serde_json::Value;

pub const WILDCARD: &str = "*";

pub const USER: &str = "user";
pub const AUTHORITY: &str = "authority";
const BUILT_IN_ENTITIES: [&str; 2] = [USER, AUTHORITY];

/// Value written to `service` when a DTO or filter option needs a service layer.
pub const SERVICE_CLASS: &str = "serviceClass";
/// Sentinel used by string options that are switched off.
pub const NO: &str = "no";

/// Case-insensitive match on the entity name only.
#[must_use]
pub fn is_built_in_entity(name: &str) -> bool {
    BUILT_IN_ENTITIES
        .iter()
        .any(|built_in| built_in.eq_ignore_ascii_case(name))
}

#[must_use]
pub fn is_user_entity(name: &str) -> bool {
    USER.eq_ignore_ascii_case(name)
}

// --- Validations ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationKind {
    pub name: &'static str,
    pub requires_value: bool,
}

pub const VALIDATIONS: &[ValidationKind] = &[
    ValidationKind {
        name: "required",
        requires_value: false,
    },
    ValidationKind {
        name: "unique",
        requires_value: false,
    },
    ValidationKind {
        name: "min",
        requires_value: true,
    },
    ValidationKind {
        name: "max",
        requires_value: true,
    },
    ValidationKind {
        name: "minlength",
        requires_value: true,
    },
    ValidationKind {
        name: "maxlength",
        requires_value: true,
    },
    ValidationKind {
        name: "pattern",
        requires_value: true,
    },
    ValidationKind {
        name: "minbytes",
        requires_value: true,
    },
    ValidationKind {
        name: "maxbytes",
        requires_value: true,
    },
];

#[must_use]
pub fn validation_kind(name: &str) -> Option<&'static ValidationKind> {
    VALIDATIONS.iter().find(|kind| kind.name == name)
}

// --- Options ---

/// How the JSON value of an option is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    True,
    False,
    OptionValue,
    OptionValueOrTrue,
}

impl ValueRule {
    /// The value to write, or `None` when the option carries no value and
    /// the key must be left out of the output.
    #[must_use]
    pub fn apply(self, option: &JdlOption) -> Option<Value> {
        match self {
            ValueRule::True => Some(Value::Bool(true)),
            ValueRule::False => Some(Value::Bool(false)),
            ValueRule::OptionValue => option.value.clone().map(Value::String),
            ValueRule::OptionValueOrTrue => Some(
                option
                    .value
                    .clone()
                    .filter(|value| !value.is_empty())
                    .map_or(Value::Bool(true), Value::String),
            ),
        }
    }
}

/// One row of the option dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRule {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Output key; `None` writes under the option's canonical name.
    pub key: Option<&'static str>,
    pub value: ValueRule,
    /// Upgrades `service: "no"` to [`SERVICE_CLASS`] on every target.
    pub requires_service: bool,
    /// Forces `searchEngine: false` on every excluded entity.
    pub excludes_from_search: bool,
}

impl OptionRule {
    const fn new(name: &'static str, aliases: &'static [&'static str], value: ValueRule) -> Self {
        Self {
            name,
            aliases,
            key: None,
            value,
            requires_service: false,
            excludes_from_search: false,
        }
    }

    const fn keyed(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    const fn with_service(mut self) -> Self {
        self.requires_service = true;
        self
    }

    const fn with_search_exclusion(mut self) -> Self {
        self.excludes_from_search = true;
        self
    }

    #[must_use]
    pub fn output_key(&self) -> &'static str {
        self.key.unwrap_or(self.name)
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const OPTION_RULES: &[OptionRule] = &[
    OptionRule::new("skipClient", &["skip-client"], ValueRule::True),
    OptionRule::new("skipServer", &["skip-server"], ValueRule::True),
    OptionRule::new("readOnly", &["read-only"], ValueRule::True),
    OptionRule::new("embedded", &[], ValueRule::True),
    OptionRule::new("dto", &[], ValueRule::OptionValue).with_service(),
    OptionRule::new("microservice", &[], ValueRule::OptionValue).keyed("microserviceName"),
    OptionRule::new("noFluentMethod", &["no-fluent-method"], ValueRule::False)
        .keyed("fluentMethods"),
    OptionRule::new("angularSuffix", &["angular-suffix"], ValueRule::OptionValue)
        .keyed("angularJSSuffix"),
    OptionRule::new("search", &[], ValueRule::OptionValue)
        .keyed("searchEngine")
        .with_search_exclusion(),
    OptionRule::new("filter", &[], ValueRule::True)
        .keyed("jpaMetamodelFiltering")
        .with_service(),
];

#[must_use]
pub fn option_rule(name: &str) -> Option<&'static OptionRule> {
    OPTION_RULES.iter().find(|rule| rule.matches(name))
}

/// Output key and value for an option, using the fallback rule for
/// options outside the table.
#[must_use]
pub fn option_key_and_value(option: &JdlOption) -> (String, Option<Value>) {
    match option_rule(&option.name) {
        Some(rule) => (rule.output_key().to_string(), rule.value.apply(option)),
        None => (
            option.name.clone(),
            ValueRule::OptionValueOrTrue.apply(option),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_built_in_entities_are_case_insensitive() {
        assert!(is_built_in_entity("User"));
        assert!(is_built_in_entity("AUTHORITY"));
        assert!(!is_built_in_entity("Users"));
        assert!(is_user_entity("uSeR"));
        assert!(!is_user_entity("Authority"));
    }

    #[test]
    fn test_validation_catalogue() {
        assert!(!validation_kind("required").unwrap().requires_value);
        assert!(!validation_kind("unique").unwrap().requires_value);
        assert!(validation_kind("min").unwrap().requires_value);
        assert!(validation_kind("pattern").unwrap().requires_value);
        assert!(validation_kind("toto").is_none());
    }

    #[test]
    fn test_option_table() {
        let cases = [
            (JdlOption::new("skipClient", ["A"]), "skipClient", json!(true)),
            (JdlOption::new("skip-server", ["A"]), "skipServer", json!(true)),
            (JdlOption::new("read-only", ["A"]), "readOnly", json!(true)),
            (JdlOption::new("embedded", ["A"]), "embedded", json!(true)),
            (
                JdlOption::new("dto", ["A"]).with_value("mapstruct"),
                "dto",
                json!("mapstruct"),
            ),
            (
                JdlOption::new("microservice", ["A"]).with_value("mymicroservice"),
                "microserviceName",
                json!("mymicroservice"),
            ),
            (JdlOption::new("noFluentMethod", ["A"]), "fluentMethods", json!(false)),
            (
                JdlOption::new("angular-suffix", ["A"]).with_value("suffix"),
                "angularJSSuffix",
                json!("suffix"),
            ),
            (
                JdlOption::new("search", ["A"]).with_value("elasticsearch"),
                "searchEngine",
                json!("elasticsearch"),
            ),
            (JdlOption::new("filter", ["A"]), "jpaMetamodelFiltering", json!(true)),
            (
                JdlOption::new("pagination", ["A"]).with_value("pager"),
                "pagination",
                json!("pager"),
            ),
            (JdlOption::new("custom", ["A"]), "custom", json!(true)),
        ];

        for (option, key, value) in cases {
            assert_eq!(
                option_key_and_value(&option),
                (key.to_string(), Some(value)),
                "option {}",
                option.name
            );
        }
    }

    #[test]
    fn test_option_without_value_has_no_output_value() {
        for name in ["dto", "microservice", "angularSuffix", "search"] {
            let (_, value) = option_key_and_value(&JdlOption::new(name, ["A"]));
            assert_eq!(value, None, "option {name}");
        }
    }

    #[test]
    fn test_side_effect_flags() {
        assert!(option_rule("dto").unwrap().requires_service);
        assert!(option_rule("filter").unwrap().requires_service);
        assert!(!option_rule("search").unwrap().requires_service);
        assert!(option_rule("search").unwrap().excludes_from_search);
        assert!(option_rule("service").is_none());
    }
}
