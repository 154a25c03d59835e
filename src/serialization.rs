use crate::catalog::{NO, WILDCARD};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

/// The lowered JSON form of one entity, consumed by the code generators.
///
/// Option-driven attributes live in `attributes` so that options can set
/// any key; the well-known ones are seeded with their defaults and keep
/// their position when overwritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonEntity {
    pub name: String,
    pub table_name: String,
    pub changelog_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
    pub fields: Vec<FieldRecord>,
    pub relationships: Vec<RelationshipRecord>,
    pub applications: Value,
}

impl JsonEntity {
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        changelog_date: impl Into<String>,
        javadoc: Option<String>,
    ) -> Self {
        let attributes = IndexMap::from([
            ("dto".to_string(), json!(NO)),
            ("service".to_string(), json!(NO)),
            ("pagination".to_string(), json!(NO)),
            ("jpaMetamodelFiltering".to_string(), json!(false)),
            ("fluentMethods".to_string(), json!(true)),
            ("readOnly".to_string(), json!(false)),
            ("embedded".to_string(), json!(false)),
            ("clientRootFolder".to_string(), json!("")),
        ]);
        Self {
            name: name.into(),
            table_name: table_name.into(),
            changelog_date: changelog_date.into(),
            javadoc,
            attributes,
            fields: Vec::new(),
            relationships: Vec::new(),
            applications: json!([]),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Drops an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = FieldRecord>) {
        self.fields.extend(fields);
    }

    pub fn add_relationships(&mut self, relationships: impl IntoIterator<Item = RelationshipRecord>) {
        self.relationships.extend(relationships);
    }

    pub fn set_all_applications(&mut self) {
        self.applications = json!(WILDCARD);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type_blob_content: Option<String>,
    pub validations: Vec<ValidationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub relationship_type: String,
    pub other_entity_name: String,
    pub relationship_name: String,
    pub other_entity_relationship_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_validate_rules: Option<String>,
}
