use crate::ast::JdlObject;
use crate::catalog::is_built_in_entity;
use crate::converter::{convert_fields, convert_relationships};
use crate::deployment::check_deployment;
use crate::error::{ArgumentError, JdlError, ValidationError};
use crate::resolver::OptionResolver;
use crate::serialization::JsonEntity;
use crate::utils::{format_comment, format_date_for_liquibase, table_name_from_entity_name};
use crate::validator::EntityValidator;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Inputs of a conversion. The graph, the application name and the database
/// type are mandatory; everything else has a default.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs<'a> {
    pub jdl_object: Option<&'a JdlObject>,
    pub application_name: Option<String>,
    pub database_type: Option<String>,
    pub application_type: Option<String>,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl<'a> ConvertArgs<'a> {
    pub fn new(
        jdl_object: &'a JdlObject,
        application_name: impl Into<String>,
        database_type: impl Into<String>,
    ) -> Self {
        Self {
            jdl_object: Some(jdl_object),
            application_name: Some(application_name.into()),
            database_type: Some(database_type.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_application_type(mut self, application_type: impl Into<String>) -> Self {
        self.application_type = Some(application_type.into());
        self
    }

    #[must_use]
    pub fn with_creation_timestamp(mut self, creation_timestamp: DateTime<Utc>) -> Self {
        self.creation_timestamp = Some(creation_timestamp);
        self
    }
}

/// The lowered entities, grouped under the application name.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub entities: IndexMap<String, Vec<JsonEntity>>,
}

impl Serialize for ConversionResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entities.serialize(serializer)
    }
}

impl ConversionResult {
    /// The entities produced for one application.
    #[must_use]
    pub fn get(&self, application_name: &str) -> Option<&[JsonEntity]> {
        self.entities.get(application_name).map(Vec::as_slice)
    }

    /// Serializes the result into a generic `serde_json::Value`.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Serializes the result into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the result into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

/// Lowers a domain-object graph into ready-to-export JSON entities.
///
/// The steps run one after the other over the whole graph: entity records,
/// options, fields, relationships, and finally the applications tag. Nothing
/// is re-validated here; run [`validate`] first when the graph may be
/// malformed.
///
/// # Errors
///
/// Returns an [`ArgumentError`] if a mandatory argument is missing, or a
/// `ReferenceError` if a relationship or an option names an undeclared entity.
pub fn convert(args: ConvertArgs<'_>) -> Result<ConversionResult, JdlError> {
    let (jdl_object, application_name, database_type) =
        match (args.jdl_object, args.application_name, args.database_type) {
            (Some(jdl_object), Some(application_name), Some(database_type))
                if !application_name.is_empty() && !database_type.is_empty() =>
            {
                (jdl_object, application_name, database_type)
            }
            _ => return Err(ArgumentError::MissingMandatoryArguments.into()),
        };
    debug!(
        "Converting entities for {application_name} (database: {database_type}, type: {})",
        args.application_type.as_deref().unwrap_or("unspecified")
    );

    let mut assembler = Assembler::new(jdl_object);
    assembler.initialize_entities(args.creation_timestamp.unwrap_or_else(Utc::now));
    assembler.set_options()?;
    assembler.set_fields();
    assembler.set_relationships()?;
    assembler.set_applications();
    let entities = assembler.finish();

    debug!("Converted {} entities for {application_name}", entities.len());
    Ok(ConversionResult {
        entities: IndexMap::from([(application_name, entities)]),
    })
}

/// Call-local conversion state: the bound graph and the output records.
struct Assembler<'a> {
    jdl_object: &'a JdlObject,
    entities: IndexMap<String, JsonEntity>,
}

impl<'a> Assembler<'a> {
    fn new(jdl_object: &'a JdlObject) -> Self {
        Assembler {
            jdl_object,
            entities: IndexMap::new(),
        }
    }

    fn initialize_entities(&mut self, creation_timestamp: DateTime<Utc>) {
        for (index, jdl_entity) in self.jdl_object.entities.iter().enumerate() {
            let Some(entity_name) = jdl_entity.name.as_deref() else {
                continue;
            };
            // A declared User or Authority stands for the platform's own
            // entity: only relationships toward it are kept.
            if is_built_in_entity(entity_name) {
                warn!(
                    "An Entity name '{entity_name}' was used: '{entity_name}' is an entity created by default. \
                     All relationships toward it will be kept but any attributes and relationships from it \
                     will be disregarded."
                );
                continue;
            }
            let table_name = jdl_entity.table_name.as_deref().unwrap_or(entity_name);
            let increment = index as i64 + 1;
            self.entities.insert(
                entity_name.to_string(),
                JsonEntity::new(
                    entity_name,
                    table_name_from_entity_name(table_name),
                    format_date_for_liquibase(creation_timestamp, increment),
                    format_comment(jdl_entity.comment.as_deref()),
                ),
            );
        }
    }

    fn set_options(&mut self) -> Result<(), JdlError> {
        OptionResolver::new(self.jdl_object).apply(&mut self.entities)?;
        Ok(())
    }

    fn set_fields(&mut self) {
        for (entity_name, fields) in convert_fields(self.jdl_object) {
            if let Some(entity) = self.entities.get_mut(&entity_name) {
                entity.add_fields(fields);
            }
        }
    }

    fn set_relationships(&mut self) -> Result<(), JdlError> {
        let converted = convert_relationships(
            &self.jdl_object.relationships,
            &self.jdl_object.entity_names(),
        )?;
        for (entity_name, relationships) in converted {
            if let Some(entity) = self.entities.get_mut(&entity_name) {
                entity.add_relationships(relationships);
            }
        }
        Ok(())
    }

    fn set_applications(&mut self) {
        for entity in self.entities.values_mut() {
            entity.set_all_applications();
        }
    }

    fn finish(self) -> Vec<JsonEntity> {
        self.entities.into_values().collect()
    }
}

/// How [`validate`] reports the problems it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first invalid entity or deployment.
    #[default]
    FailFast,
    /// Check everything and report every invalid entity and deployment.
    Aggregate,
}

/// Runs the entity validator over every entity and the deployment validator
/// over every deployment of the graph.
///
/// # Errors
/// Returns the failures found, a single one in [`ValidationMode::FailFast`].
pub fn validate(jdl_object: &JdlObject, mode: ValidationMode) -> Result<(), Vec<ValidationError>> {
    let validator = EntityValidator::new();
    let mut errors = Vec::new();

    let entity_results = jdl_object
        .entities
        .iter()
        .map(|entity| validator.validate(Some(entity)));
    let deployment_results = jdl_object
        .deployments
        .iter()
        .map(|deployment| check_deployment(Some(deployment)));

    for result in entity_results.chain(deployment_results) {
        if let Err(error) = result {
            errors.push(error);
            if mode == ValidationMode::FailFast {
                break;
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
