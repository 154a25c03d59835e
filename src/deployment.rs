use crate::ast::JdlDeployment;
use crate::error::{DescriptorKind, ValidationError};
use crate::presence::check_presence;

pub const DOCKER_COMPOSE: &str = "docker-compose";
pub const KUBERNETES: &str = "kubernetes";
pub const OPENSHIFT: &str = "openshift";

const DEPLOYMENT_ATTRIBUTES: [&str; 3] = ["deploymentType", "appsFolders", "dockerRepositoryName"];
const INGRESS: &str = "Ingress";

/// Checks that a deployment carries the attributes its type needs.
///
/// # Errors
/// Fails when the deployment is absent, misses any common attribute, has an
/// unsupported type, or misses an attribute specific to its type.
pub fn check_deployment(deployment: Option<&JdlDeployment>) -> Result<(), ValidationError> {
    let deployment = deployment.ok_or(ValidationError::Absent {
        kind: DescriptorKind::Deployment,
    })?;
    check_presence(deployment, &DEPLOYMENT_ATTRIBUTES)
        .map_err(|missing| ValidationError::missing(DescriptorKind::Deployment, missing))?;

    let deployment_type = deployment.deployment_type.as_deref().unwrap_or_default();
    let required: &[&str] = match deployment_type {
        DOCKER_COMPOSE => &[],
        KUBERNETES if deployment.kubernetes_service_type.as_deref() == Some(INGRESS) => {
            &["ingressDomain"]
        }
        KUBERNETES => &[],
        OPENSHIFT => &["openshiftNamespace"],
        other => {
            return Err(ValidationError::UnsupportedDeploymentType {
                deployment_type: other.to_string(),
            })
        }
    };
    check_presence(deployment, required)
        .map_err(|missing| ValidationError::missing(DescriptorKind::Deployment, missing))
}
