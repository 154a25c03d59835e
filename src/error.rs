use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum JdlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reference(#[from] ReferenceError),
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("The JDL object, the application's name and its database type are mandatory.")]
    #[diagnostic(
        code(convert::missing_arguments),
        help("Pass the domain-object graph, a non-empty application name and a database type.")
    )]
    MissingMandatoryArguments,
}

/// The kind of descriptor a validation error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    Entity,
    Field,
    Validation,
    Deployment,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DescriptorKind::Entity => "entity",
            DescriptorKind::Field => "field",
            DescriptorKind::Validation => "validation",
            DescriptorKind::Deployment => "deployment",
        };
        write!(f, "{name}")
    }
}

/// Semantic errors raised by the validators. The `Display` output is the
/// user-facing message; the variants keep the offending identifiers.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No {kind}.")]
    #[diagnostic(code(validation::absent))]
    Absent { kind: DescriptorKind },

    #[error("The {kind} {} {} not found.", attribute_noun(*.kind, .attributes), missing_list(*.kind, .attributes))]
    #[diagnostic(
        code(validation::missing_attributes),
        help("Every listed attribute must be present and not null.")
    )]
    MissingAttributes {
        kind: DescriptorKind,
        attributes: Vec<String>,
    },

    #[error("No field.")]
    #[diagnostic(
        code(validation::no_field),
        help("An entity must declare at least one field.")
    )]
    NoField,

    #[error("The validation {name} doesn't exist.")]
    #[diagnostic(
        code(validation::unknown_validation),
        help("Known validations: required, unique, min, max, minlength, maxlength, pattern, minbytes, maxbytes.")
    )]
    UnknownValidation { name: String },

    #[error("The validation {name} requires a value.")]
    #[diagnostic(code(validation::missing_value))]
    MissingValidationValue { name: String },

    #[error("The deployment type {deployment_type} isn't supported.")]
    #[diagnostic(
        code(validation::unsupported_deployment),
        help("Supported deployment types: docker-compose, kubernetes, openshift.")
    )]
    UnsupportedDeploymentType { deployment_type: String },

    #[error("Entity {entity},\n\t{source}")]
    #[diagnostic(code(validation::entity))]
    InEntity {
        entity: String,
        source: Box<ValidationError>,
    },

    #[error("Field {field}, \n\t{source}")]
    #[diagnostic(code(validation::field))]
    InField {
        field: String,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    pub(crate) fn missing(kind: DescriptorKind, attributes: Vec<&str>) -> Self {
        ValidationError::MissingAttributes {
            kind,
            attributes: attributes.into_iter().map(str::to_string).collect(),
        }
    }

    pub(crate) fn in_entity(entity: &str, source: ValidationError) -> Self {
        ValidationError::InEntity {
            entity: entity.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn in_field(field: &str, source: ValidationError) -> Self {
        ValidationError::InField {
            field: field.to_string(),
            source: Box::new(source),
        }
    }

    /// The innermost error, with entity and field context stripped.
    #[must_use]
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            ValidationError::InEntity { source, .. } | ValidationError::InField { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Name of the entity the error was raised for, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        match self {
            ValidationError::InEntity { entity, .. } => Some(entity),
            _ => None,
        }
    }
}

// Deployment messages always use the plural form.
fn is_singular(kind: DescriptorKind, attributes: &[String]) -> bool {
    kind != DescriptorKind::Deployment && attributes.len() == 1
}

fn attribute_noun(kind: DescriptorKind, attributes: &[String]) -> &'static str {
    if is_singular(kind, attributes) {
        "attribute"
    } else {
        "attributes"
    }
}

fn missing_list(kind: DescriptorKind, attributes: &[String]) -> String {
    let verb = if is_singular(kind, attributes) {
        "was"
    } else {
        "were"
    };
    format!("{} {verb}", attributes.join(", "))
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("In the relationship between {from} and {to}, {entity} is not declared.")]
    #[diagnostic(
        code(reference::relationship_entity),
        help("Declare the entity, or point the relationship at a built-in entity (User, Authority).")
    )]
    UnknownRelationshipEntity {
        from: String,
        to: String,
        entity: String,
    },

    #[error("The option {option} targets the entity {entity}, which is not declared.")]
    #[diagnostic(code(reference::option_entity))]
    UnknownOptionEntity { option: String, entity: String },
}
