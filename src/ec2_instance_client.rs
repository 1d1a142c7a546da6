use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{Ec2, Ec2Client, Instance};

use crate::control::{Control, ServiceStatus, SERVICE_TAG_KEY};
use crate::error::ControlResourceError;
use crate::request::Action;
use rusoto_ec2::{DescribeInstancesRequest, StartInstancesRequest, StopInstancesRequest};
use serde::Serialize;
use tracing::info;

const NAME_TAG_KEY: &str = "Name";
const SPOT_LIFECYCLE: &str = "spot";

pub struct Ec2InstanceClient {
    client: Ec2Client,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InstanceState {
    Running,
    Stopped,
    Other,
}

impl InstanceState {
    fn from_name(name: &str) -> InstanceState {
        match name {
            "running" => InstanceState::Running,
            "stopped" => InstanceState::Stopped,
            _ => InstanceState::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lifecycle {
    Normal,
    Spot,
}

#[derive(Debug, PartialEq)]
struct MachineInstance {
    instance_id: String,
    instance_type: String,
    display_name: String,
    lifecycle: Lifecycle,
    state: InstanceState,
    service: Option<String>,
}

impl MachineInstance {
    fn from_instance(instance: Instance) -> Result<MachineInstance, ControlResourceError> {
        let mut display_name = String::new();
        let mut service = None;
        for tag in instance.tags.unwrap_or_default() {
            let key = tag.key.unwrap_or_default();
            let value = tag.value.unwrap_or_default();
            if key == NAME_TAG_KEY {
                display_name = value;
            } else if key == SERVICE_TAG_KEY {
                service = Some(value);
            }
        }

        let state = instance
            .state
            .and_then(|state| state.name)
            .map_or(InstanceState::Other, |name| InstanceState::from_name(&name));
        let lifecycle = if instance.instance_lifecycle.as_deref() == Some(SPOT_LIFECYCLE) {
            Lifecycle::Spot
        } else {
            Lifecycle::Normal
        };

        Ok(MachineInstance {
            instance_id: instance.instance_id.ok_or(ControlResourceError::NoneValue)?,
            instance_type: instance
                .instance_type
                .ok_or(ControlResourceError::NoneValue)?,
            display_name,
            lifecycle,
            state,
            service,
        })
    }

    fn serves(&self, target_service: &str) -> bool {
        self.service.as_deref() == Some(target_service)
    }
}

/// Status entry for one running instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceStatus {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
    #[serde(rename = "InstanceType")]
    pub instance_type: String,
}

#[async_trait]
impl Control for Ec2InstanceClient {
    async fn status(
        &self,
        target_service: &str,
    ) -> Result<Vec<ServiceStatus>, ControlResourceError> {
        let statuses = self
            .describe_all_instances()
            .await?
            .into_iter()
            .filter(|instance| {
                instance.serves(target_service) && instance.state == InstanceState::Running
            })
            .map(|instance| {
                ServiceStatus::Instance(InstanceStatus {
                    name: instance.display_name,
                    instance_id: instance.instance_id,
                    instance_type: instance.instance_type,
                })
            })
            .collect();
        Ok(statuses)
    }

    async fn apply(
        &self,
        action: Action,
        target_service: &str,
    ) -> Result<Vec<String>, ControlResourceError> {
        match action {
            Action::Start => self.start_stopped_instances(target_service).await,
            Action::Stop => self.stop_running_instances(target_service).await,
            Action::Status => Ok(Vec::new()),
        }
    }
}

impl Ec2InstanceClient {
    pub fn new(region: Region) -> Self {
        Ec2InstanceClient {
            client: Ec2Client::new(region),
        }
    }

    fn new_with_client(client: Ec2Client) -> Self {
        Ec2InstanceClient { client }
    }

    async fn describe_all_instances(&self) -> Result<Vec<MachineInstance>, ControlResourceError> {
        let result = self
            .client
            .describe_instances(DescribeInstancesRequest::default())
            .await?;

        let mut machine_instances = Vec::<MachineInstance>::new();
        for reservation in result.reservations.ok_or(ControlResourceError::NoneValue)? {
            for instance in reservation.instances.ok_or(ControlResourceError::NoneValue)? {
                machine_instances.push(MachineInstance::from_instance(instance)?);
            }
        }
        Ok(machine_instances)
    }

    /// Starts every matching stopped instance. Instances already running are
    /// left untouched.
    async fn start_stopped_instances(
        &self,
        target_service: &str,
    ) -> Result<Vec<String>, ControlResourceError> {
        let mut started = Vec::new();
        for instance in self.describe_all_instances().await? {
            if !instance.serves(target_service) || instance.state != InstanceState::Stopped {
                continue;
            }
            self.client
                .start_instances(StartInstancesRequest {
                    instance_ids: vec![instance.instance_id.clone()],
                    ..StartInstancesRequest::default()
                })
                .await?;
            info!("start requested for instance {}", instance.instance_id);
            started.push(instance.instance_id);
        }
        Ok(started)
    }

    /// Stops every matching running instance. Spot instances cannot be
    /// stopped, only terminated, so they are always skipped.
    async fn stop_running_instances(
        &self,
        target_service: &str,
    ) -> Result<Vec<String>, ControlResourceError> {
        let mut stopped = Vec::new();
        for instance in self.describe_all_instances().await? {
            if !instance.serves(target_service) || instance.state != InstanceState::Running {
                continue;
            }
            if instance.lifecycle == Lifecycle::Spot {
                continue;
            }
            self.client
                .stop_instances(StopInstancesRequest {
                    instance_ids: vec![instance.instance_id.clone()],
                    ..StopInstancesRequest::default()
                })
                .await?;
            info!("stop requested for instance {}", instance.instance_id);
            stopped.push(instance.instance_id);
        }
        Ok(stopped)
    }
}
