//! Projection of the graph's fields and relationships into per-entity
//! JSON records. Both converters are pure and keep declaration order.

use crate::ast::{JdlField, JdlObject, JdlRelationship};
use crate::catalog::is_built_in_entity;
use crate::error::ReferenceError;
use crate::serialization::{FieldRecord, RelationshipRecord, ValidationRecord};
use crate::utils::{camel_case, extract_field, format_comment, lower_first};
use indexmap::IndexMap;

const BYTES_TYPE: &str = "byte[]";
const REQUIRED: &str = "required";

/// Converts the fields of every named entity, keyed by entity name.
#[must_use]
pub fn convert_fields(jdl_object: &JdlObject) -> IndexMap<String, Vec<FieldRecord>> {
    jdl_object
        .entities
        .iter()
        .filter_map(|entity| {
            let name = entity.name.clone()?;
            let fields: Vec<FieldRecord> = entity
                .fields
                .iter()
                .map(|(key, field)| convert_field(jdl_object, key, field))
                .collect();
            Some((name, fields))
        })
        .collect()
}

fn convert_field(jdl_object: &JdlObject, key: &str, field: &JdlField) -> FieldRecord {
    let declared_type = field.field_type.as_deref();
    let blob_content = declared_type.and_then(blob_content);
    let field_type = if blob_content.is_some() {
        Some(BYTES_TYPE.to_string())
    } else {
        field.field_type.clone()
    };
    let field_values = declared_type
        .and_then(|field_type| jdl_object.get_enum(field_type))
        .map(|jdl_enum| jdl_enum.values.join(","));

    FieldRecord {
        field_name: field.name.clone().unwrap_or_else(|| key.to_string()),
        field_type,
        javadoc: format_comment(field.comment.as_deref()),
        field_values,
        field_type_blob_content: blob_content.map(str::to_string),
        validations: field
            .validations
            .values()
            .filter_map(|validation| {
                Some(ValidationRecord {
                    name: validation.name.clone()?,
                    value: validation.defined_value().cloned(),
                })
            })
            .collect(),
    }
}

fn blob_content(field_type: &str) -> Option<&'static str> {
    match field_type {
        "Blob" | "AnyBlob" => Some("any"),
        "ImageBlob" => Some("image"),
        "TextBlob" => Some("text"),
        _ => None,
    }
}

/// Converts relationships into records on both of their ends.
///
/// The declaring side always gets a record; the other side only when the
/// relationship injects a field into it. Records are only produced for
/// entities in `entity_names`, so a built-in endpoint that was not declared
/// is accepted and simply receives nothing.
///
/// # Errors
/// Returns a [`ReferenceError`] when an endpoint is neither declared nor a
/// built-in entity.
pub fn convert_relationships(
    relationships: &[JdlRelationship],
    entity_names: &[String],
) -> Result<IndexMap<String, Vec<RelationshipRecord>>, ReferenceError> {
    let mut converted: IndexMap<String, Vec<RelationshipRecord>> = entity_names
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    for relationship in relationships {
        for endpoint in [&relationship.from, &relationship.to] {
            if !converted.contains_key(endpoint.as_str()) && !is_built_in_entity(endpoint) {
                return Err(ReferenceError::UnknownRelationshipEntity {
                    from: relationship.from.clone(),
                    to: relationship.to.clone(),
                    entity: endpoint.clone(),
                });
            }
        }
    }

    // Every entity lists the relationships it declares before the ones it
    // receives.
    for (entity_name, records) in converted.iter_mut() {
        records.extend(
            relationships
                .iter()
                .filter(|relationship| &relationship.from == entity_name)
                .map(from_side),
        );
        records.extend(
            relationships
                .iter()
                .filter(|relationship| {
                    &relationship.to == entity_name && relationship.injected_field_in_to.is_some()
                })
                .map(to_side),
        );
    }
    Ok(converted)
}

fn from_side(relationship: &JdlRelationship) -> RelationshipRecord {
    let (relationship_name, other_entity_field) =
        extract_field(relationship.injected_field_in_from.as_deref());
    let (other_relationship_name, _) = extract_field(relationship.injected_field_in_to.as_deref());
    let relationship_type = relationship.relationship_type;

    RelationshipRecord {
        relationship_type: relationship_type.as_kebab().to_string(),
        other_entity_name: lower_first(&relationship.to),
        relationship_name: camel_case(relationship_name.unwrap_or(&relationship.to)),
        other_entity_relationship_name: lower_first(
            other_relationship_name.unwrap_or(&relationship.from),
        ),
        other_entity_field: other_entity_field.map(lower_first),
        owner_side: relationship_type.has_owner_side().then_some(true),
        javadoc: format_comment(relationship.comment_in_from.as_deref()),
        relationship_validate_rules: relationship
            .is_injected_field_in_from_required
            .then(|| REQUIRED.to_string()),
    }
}

fn to_side(relationship: &JdlRelationship) -> RelationshipRecord {
    let (relationship_name, other_entity_field) =
        extract_field(relationship.injected_field_in_to.as_deref());
    let (other_relationship_name, _) =
        extract_field(relationship.injected_field_in_from.as_deref());
    let relationship_type = relationship.relationship_type.inverse();

    RelationshipRecord {
        relationship_type: relationship_type.as_kebab().to_string(),
        other_entity_name: lower_first(&relationship.from),
        relationship_name: camel_case(relationship_name.unwrap_or(&relationship.from)),
        other_entity_relationship_name: lower_first(
            other_relationship_name.unwrap_or(&relationship.to),
        ),
        other_entity_field: other_entity_field.map(lower_first),
        owner_side: relationship_type.has_owner_side().then_some(false),
        javadoc: format_comment(relationship.comment_in_to.as_deref()),
        relationship_validate_rules: relationship
            .is_injected_field_in_to_required
            .then(|| REQUIRED.to_string()),
    }
}
