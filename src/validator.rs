use crate::ast::{JdlEntity, JdlField, JdlValidation};
use crate::catalog;
use crate::error::{DescriptorKind, ValidationError};
use crate::presence::check_presence;

const VALIDATION_ATTRIBUTES: [&str; 1] = ["name"];
const ENTITY_ATTRIBUTES: [&str; 2] = ["name", "tableName"];
const FIELD_ATTRIBUTES: [&str; 2] = ["name", "type"];

/// Checks a single field validation against the validation catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationValidator;

impl ValidationValidator {
    pub fn new() -> Self {
        ValidationValidator
    }

    /// # Errors
    /// Fails when the validation is absent, unnamed, unknown, or lacks a
    /// value its catalogue entry requires.
    pub fn validate(&self, validation: Option<&JdlValidation>) -> Result<(), ValidationError> {
        let validation = validation.ok_or(ValidationError::Absent {
            kind: DescriptorKind::Validation,
        })?;
        check_presence(validation, &VALIDATION_ATTRIBUTES)
            .map_err(|missing| ValidationError::missing(DescriptorKind::Validation, missing))?;

        let name = validation.name.as_deref().unwrap_or_default();
        let kind = catalog::validation_kind(name).ok_or_else(|| ValidationError::UnknownValidation {
            name: name.to_string(),
        })?;
        if kind.requires_value && validation.defined_value().is_none() {
            return Err(ValidationError::MissingValidationValue {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Checks an entity, its fields and their validations. The first failure
/// wins: entity attributes, then field presence, then each field's
/// attributes and validations in declaration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityValidator {
    validation_validator: ValidationValidator,
}

impl EntityValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns the first rule the entity breaks, wrapped with the entity
    /// (and field) name where one applies.
    pub fn validate(&self, entity: Option<&JdlEntity>) -> Result<(), ValidationError> {
        let entity = entity.ok_or(ValidationError::Absent {
            kind: DescriptorKind::Entity,
        })?;
        check_presence(entity, &ENTITY_ATTRIBUTES)
            .map_err(|missing| ValidationError::missing(DescriptorKind::Entity, missing))?;

        let entity_name = entity.name.as_deref().unwrap_or_default();
        self.validate_fields(entity)
            .map_err(|error| ValidationError::in_entity(entity_name, error))
    }

    /// Validates every entity, collecting at most one error per entity.
    #[must_use]
    pub fn validate_all<'a, I>(&self, entities: I) -> Vec<ValidationError>
    where
        I: IntoIterator<Item = &'a JdlEntity>,
    {
        entities
            .into_iter()
            .filter_map(|entity| self.validate(Some(entity)).err())
            .collect()
    }

    fn validate_fields(&self, entity: &JdlEntity) -> Result<(), ValidationError> {
        if entity.fields.is_empty() {
            return Err(ValidationError::NoField);
        }
        for field in entity.fields.values() {
            self.validate_field(field)?;
        }
        Ok(())
    }

    fn validate_field(&self, field: &JdlField) -> Result<(), ValidationError> {
        check_presence(field, &FIELD_ATTRIBUTES)
            .map_err(|missing| ValidationError::missing(DescriptorKind::Field, missing))?;

        let field_name = field.name.as_deref().unwrap_or_default();
        for validation in field.validations.values() {
            self.validation_validator
                .validate(Some(validation))
                .map_err(|error| ValidationError::in_field(field_name, error))?;
        }
        Ok(())
    }
}
