use crate::ast::{JdlObject, JdlOption};
use crate::catalog::{self, is_built_in_entity, is_user_entity, OptionRule, NO, SERVICE_CLASS};
use crate::error::ReferenceError;
use crate::serialization::JsonEntity;
use indexmap::IndexMap;
use log::{debug, info};
use serde_json::{json, Value};

const SEARCH_ENGINE: &str = "searchEngine";
const SERVICE: &str = "service";

/// An option with its wildcard expanded and its JSON key and value computed.
/// A `None` value removes the key from its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOption<'a> {
    pub option: &'a JdlOption,
    pub rule: Option<&'static OptionRule>,
    pub entity_names: Vec<String>,
    pub key: String,
    pub value: Option<Value>,
}

/// Expands and applies the options of a graph. The graph itself is never
/// mutated.
pub struct OptionResolver<'a> {
    jdl_object: &'a JdlObject,
}

impl<'a> OptionResolver<'a> {
    pub fn new(jdl_object: &'a JdlObject) -> Self {
        OptionResolver { jdl_object }
    }

    /// Resolves every option in declaration order.
    #[must_use]
    pub fn resolve(&self) -> Vec<ResolvedOption<'a>> {
        let declared = self.jdl_object.entity_names();
        self.jdl_object
            .options
            .iter()
            .map(|option| {
                let (key, value) = catalog::option_key_and_value(option);
                ResolvedOption {
                    option,
                    rule: catalog::option_rule(&option.name),
                    entity_names: resolve_entity_names(option, &declared),
                    key,
                    value,
                }
            })
            .collect()
    }

    /// Resolves the options and writes them onto the output entities.
    ///
    /// # Errors
    /// Fails when an option targets or excludes an entity that has no output
    /// record and is not a built-in entity.
    pub fn apply(&self, entities: &mut IndexMap<String, JsonEntity>) -> Result<(), ReferenceError> {
        for resolved in self.resolve() {
            apply_option(&resolved, entities)?;
        }
        Ok(())
    }
}

/// The option's targets, with `*` replaced by every declared entity except
/// the excluded ones and the user entity.
#[must_use]
pub fn resolve_entity_names(option: &JdlOption, declared: &[String]) -> Vec<String> {
    if option.targets_all() {
        declared
            .iter()
            .filter(|name| !option.excluded_names.contains(name.as_str()) && !is_user_entity(name))
            .cloned()
            .collect()
    } else {
        option.entity_names.iter().cloned().collect()
    }
}

fn apply_option(
    resolved: &ResolvedOption<'_>,
    entities: &mut IndexMap<String, JsonEntity>,
) -> Result<(), ReferenceError> {
    let option_name = &resolved.option.name;

    for entity_name in &resolved.entity_names {
        let Some(entity) = target(entities, option_name, entity_name)? else {
            continue;
        };
        match &resolved.value {
            Some(value) => entity.set(resolved.key.clone(), value.clone()),
            None => {
                entity.remove(&resolved.key);
            }
        }
    }

    if resolved.rule.is_some_and(|rule| rule.requires_service) {
        for entity_name in &resolved.entity_names {
            let Some(entity) = target(entities, option_name, entity_name)? else {
                continue;
            };
            if entity.get(SERVICE) == Some(&json!(NO)) {
                info!(
                    "The {option_name} option is set for {entity_name}, the '{SERVICE_CLASS}' value for the \
                     'service' is gonna be set for this entity if no other value has been set."
                );
                entity.set(SERVICE, json!(SERVICE_CLASS));
            }
        }
    }

    if resolved.rule.is_some_and(|rule| rule.excludes_from_search) {
        for entity_name in &resolved.option.excluded_names {
            if let Some(entity) = target(entities, option_name, entity_name)? {
                entity.set(SEARCH_ENGINE, json!(false));
            }
        }
    }
    Ok(())
}

// Built-in entities have no output record, so options naming them are
// dropped rather than rejected.
fn target<'e>(
    entities: &'e mut IndexMap<String, JsonEntity>,
    option_name: &str,
    entity_name: &str,
) -> Result<Option<&'e mut JsonEntity>, ReferenceError> {
    if let Some(entity) = entities.get_mut(entity_name) {
        return Ok(Some(entity));
    }
    if is_built_in_entity(entity_name) {
        debug!("Ignoring the {option_name} option for the built-in entity {entity_name}");
        return Ok(None);
    }
    Err(ReferenceError::UnknownOptionEntity {
        option: option_name.to_string(),
        entity: entity_name.to_string(),
    })
}
