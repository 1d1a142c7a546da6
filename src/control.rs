use crate::auto_scaling_group_client::{AutoScalingGroupClient, GroupStatus};
use crate::ec2_instance_client::{Ec2InstanceClient, InstanceStatus};
use crate::error::ControlResourceError;
use crate::request::Action;
use async_trait::async_trait;
use rusoto_core::Region;
use serde::Serialize;

/// Tag key every controlled resource is matched on. The caller supplies the
/// value.
pub const SERVICE_TAG_KEY: &str = "Service";

/// Uniform handle over one AWS resource kind.
///
/// `apply` is fire-and-forget: it returns the identifiers of the resources a
/// command was issued for once the provider has accepted the requests, not
/// once the resources reach the target state. Callers needing confirmation
/// must poll `status` separately.
#[async_trait]
pub trait Control {
    async fn status(
        &self,
        target_service: &str,
    ) -> Result<Vec<ServiceStatus>, ControlResourceError>;

    async fn apply(
        &self,
        action: Action,
        target_service: &str,
    ) -> Result<Vec<String>, ControlResourceError>;
}

/// One entry of a status response, serialized with the provider-style field
/// names the caller expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceStatus {
    Instance(InstanceStatus),
    Group(GroupStatus),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceKind {
    Ec2,
    AutoScalingGroup,
}

impl ResourceKind {
    pub fn from_name(name: &str) -> Option<ResourceKind> {
        match name {
            "ec2" => Some(ResourceKind::Ec2),
            "autoscaling" => Some(ResourceKind::AutoScalingGroup),
            _ => None,
        }
    }
}

/// Builds one controller per requested kind name, in request order. The
/// first unknown name fails the whole build; no partial list is returned.
pub fn build_controllers(
    names: &[String],
    region: &Region,
) -> Result<Vec<Box<dyn Control + Send + Sync>>, ControlResourceError> {
    names
        .iter()
        .map(|name| {
            let kind = ResourceKind::from_name(name)
                .ok_or_else(|| ControlResourceError::UnsupportedResourceKind(name.clone()))?;
            let controller: Box<dyn Control + Send + Sync> = match kind {
                ResourceKind::Ec2 => Box::new(Ec2InstanceClient::new(region.clone())),
                ResourceKind::AutoScalingGroup => {
                    Box::new(AutoScalingGroupClient::new(region.clone()))
                }
            };
            Ok(controller)
        })
        .collect()
}
