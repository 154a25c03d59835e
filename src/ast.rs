use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The parsed domain model handed over by the JDL parser.
///
/// Every collection keeps declaration order, which drives changelog dates
/// and the order of the emitted fields and relationships.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlObject {
    pub entities: Vec<JdlEntity>,
    pub enums: IndexMap<String, JdlEnum>,
    pub relationships: Vec<JdlRelationship>,
    pub options: Vec<JdlOption>,
    pub deployments: Vec<JdlDeployment>,
}

impl JdlObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the declared entities, in declaration order. Unnamed
    /// entities are skipped.
    #[must_use]
    pub fn entity_names(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter_map(|entity| entity.name.clone())
            .collect()
    }

    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<&JdlEntity> {
        self.entities
            .iter()
            .find(|entity| entity.name.as_deref() == Some(name))
    }

    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&JdlEnum> {
        self.enums.get(name)
    }

    pub fn add_entity(&mut self, entity: JdlEntity) {
        self.entities.push(entity);
    }

    pub fn add_enum(&mut self, jdl_enum: JdlEnum) {
        self.enums.insert(jdl_enum.name.clone(), jdl_enum);
    }

    pub fn add_relationship(&mut self, relationship: JdlRelationship) {
        self.relationships.push(relationship);
    }

    pub fn add_option(&mut self, option: JdlOption) {
        self.options.push(option);
    }

    pub fn add_deployment(&mut self, deployment: JdlDeployment) {
        self.deployments.push(deployment);
    }
}

// --- Entities, fields and validations ---

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlEntity {
    pub name: Option<String>,
    pub table_name: Option<String>,
    pub comment: Option<String>,
    pub fields: IndexMap<String, JdlField>,
}

impl JdlEntity {
    /// Creates an entity whose table name defaults to its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            table_name: Some(name.clone()),
            name: Some(name),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Adds a field, keyed by its name. Unnamed fields are keyed by position.
    pub fn add_field(&mut self, field: JdlField) {
        let key = field
            .name
            .clone()
            .unwrap_or_else(|| self.fields.len().to_string());
        self.fields.insert(key, field);
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlField {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub comment: Option<String>,
    pub validations: IndexMap<String, JdlValidation>,
}

impl JdlField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn add_validation(&mut self, validation: JdlValidation) {
        let key = validation
            .name
            .clone()
            .unwrap_or_else(|| self.validations.len().to_string());
        self.validations.insert(key, validation);
    }
}

/// A field validation such as `required` or `min(42)`.
///
/// `value` is kept as raw JSON: the parser may hand over numbers or
/// strings (patterns), and `null` is treated the same as an absent value.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlValidation {
    pub name: Option<String>,
    pub value: Option<Value>,
}

impl JdlValidation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// The value, unless it is absent or `null`.
    #[must_use]
    pub fn defined_value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|value| !value.is_null())
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlEnum {
    pub name: String,
    pub values: Vec<String>,
    pub comment: Option<String>,
}

impl JdlEnum {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            comment: None,
        }
    }
}

// --- Relationships ---

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipType {
    /// The kebab-case spelling used in the emitted JSON.
    #[must_use]
    pub fn as_kebab(self) -> &'static str {
        match self {
            RelationshipType::OneToOne => "one-to-one",
            RelationshipType::OneToMany => "one-to-many",
            RelationshipType::ManyToOne => "many-to-one",
            RelationshipType::ManyToMany => "many-to-many",
        }
    }

    /// The type seen from the other end of the relationship.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            RelationshipType::OneToMany => RelationshipType::ManyToOne,
            RelationshipType::ManyToOne => RelationshipType::OneToMany,
            other => other,
        }
    }

    /// Whether the declaring side owns the join.
    #[must_use]
    pub fn has_owner_side(self) -> bool {
        matches!(self, RelationshipType::OneToOne | RelationshipType::ManyToMany)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipType::OneToOne => "OneToOne",
            RelationshipType::OneToMany => "OneToMany",
            RelationshipType::ManyToOne => "ManyToOne",
            RelationshipType::ManyToMany => "ManyToMany",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdlRelationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub injected_field_in_from: Option<String>,
    #[serde(default)]
    pub injected_field_in_to: Option<String>,
    #[serde(default)]
    pub is_injected_field_in_from_required: bool,
    #[serde(default)]
    pub is_injected_field_in_to_required: bool,
    #[serde(default)]
    pub comment_in_from: Option<String>,
    #[serde(default)]
    pub comment_in_to: Option<String>,
}

impl JdlRelationship {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relationship_type,
            injected_field_in_from: None,
            injected_field_in_to: None,
            is_injected_field_in_from_required: false,
            is_injected_field_in_to_required: false,
            comment_in_from: None,
            comment_in_to: None,
        }
    }

    #[must_use]
    pub fn with_injected_fields(mut self, in_from: Option<&str>, in_to: Option<&str>) -> Self {
        self.injected_field_in_from = in_from.map(str::to_string);
        self.injected_field_in_to = in_to.map(str::to_string);
        self
    }
}

// --- Options ---

/// An option such as `dto * with mapstruct except B`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlOption {
    pub name: String,
    pub entity_names: IndexSet<String>,
    pub excluded_names: IndexSet<String>,
    pub value: Option<String>,
}

impl JdlOption {
    pub fn new<I, S>(name: impl Into<String>, entity_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entity_names: entity_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn excluding<I, S>(mut self, excluded_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_names = excluded_names.into_iter().map(Into::into).collect();
        self
    }

    /// True when the option targets exactly `*`.
    #[must_use]
    pub fn targets_all(&self) -> bool {
        self.entity_names.len() == 1 && self.entity_names.contains(crate::catalog::WILDCARD)
    }
}

// --- Deployments ---

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlDeployment {
    pub deployment_type: Option<String>,
    pub apps_folders: Option<Vec<String>>,
    pub docker_repository_name: Option<String>,
    pub docker_push_command: Option<String>,
    pub directory_path: Option<String>,
    pub gateway_type: Option<String>,
    pub monitoring: Option<String>,
    pub service_discovery_type: Option<String>,
    pub kubernetes_namespace: Option<String>,
    pub kubernetes_service_type: Option<String>,
    pub ingress_domain: Option<String>,
    pub openshift_namespace: Option<String>,
    pub storage_type: Option<String>,
}
