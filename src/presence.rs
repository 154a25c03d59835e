//! Attribute presence checks shared by every validator.
//!
//! Presence means the key exists with a non-null value; falsy values such
//! as `false`, `0` or `""` are present.

use crate::ast::{JdlDeployment, JdlEntity, JdlField, JdlValidation};
use serde_json::{Map, Value};

/// A record whose attributes can be looked up by their JDL name.
pub trait Attributes {
    fn has_attribute(&self, name: &str) -> bool;
}

/// Returns the required attribute names that are absent, in the order
/// they were requested. An empty vector means every attribute is present.
pub fn missing_attributes<'a, R>(record: &R, required: &[&'a str]) -> Vec<&'a str>
where
    R: Attributes + ?Sized,
{
    required
        .iter()
        .copied()
        .filter(|name| !record.has_attribute(name))
        .collect()
}

/// Fails with the full list of missing attribute names.
pub fn check_presence<'a, R>(record: &R, required: &[&'a str]) -> Result<(), Vec<&'a str>>
where
    R: Attributes + ?Sized,
{
    let missing = missing_attributes(record, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

impl Attributes for Map<String, Value> {
    fn has_attribute(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_null())
    }
}

impl Attributes for Value {
    fn has_attribute(&self, name: &str) -> bool {
        self.as_object().is_some_and(|map| map.has_attribute(name))
    }
}

impl Attributes for JdlEntity {
    fn has_attribute(&self, name: &str) -> bool {
        match name {
            "name" => self.name.is_some(),
            "tableName" => self.table_name.is_some(),
            "comment" => self.comment.is_some(),
            "fields" => true,
            _ => false,
        }
    }
}

impl Attributes for JdlField {
    fn has_attribute(&self, name: &str) -> bool {
        match name {
            "name" => self.name.is_some(),
            "type" => self.field_type.is_some(),
            "comment" => self.comment.is_some(),
            "validations" => true,
            _ => false,
        }
    }
}

impl Attributes for JdlValidation {
    fn has_attribute(&self, name: &str) -> bool {
        match name {
            "name" => self.name.is_some(),
            "value" => self.defined_value().is_some(),
            _ => false,
        }
    }
}

impl Attributes for JdlDeployment {
    fn has_attribute(&self, name: &str) -> bool {
        match name {
            "deploymentType" => self.deployment_type.is_some(),
            "appsFolders" => self.apps_folders.is_some(),
            "dockerRepositoryName" => self.docker_repository_name.is_some(),
            "dockerPushCommand" => self.docker_push_command.is_some(),
            "directoryPath" => self.directory_path.is_some(),
            "gatewayType" => self.gateway_type.is_some(),
            "monitoring" => self.monitoring.is_some(),
            "serviceDiscoveryType" => self.service_discovery_type.is_some(),
            "kubernetesNamespace" => self.kubernetes_namespace.is_some(),
            "kubernetesServiceType" => self.kubernetes_service_type.is_some(),
            "ingressDomain" => self.ingress_domain.is_some(),
            "openshiftNamespace" => self.openshift_namespace.is_some(),
            "storageType" => self.storage_type.is_some(),
            _ => false,
        }
    }
}
