use async_trait::async_trait;
use rusoto_autoscaling::{
    AutoScalingGroup, AutoScalingGroupNamesType, Autoscaling, AutoscalingClient,
    UpdateAutoScalingGroupType,
};
use rusoto_core::Region;

use crate::control::{Control, ServiceStatus, SERVICE_TAG_KEY};
use crate::error::ControlResourceError;
use crate::request::Action;
use serde::Serialize;
use tracing::info;

/// Capacity written to min/max/desired when a group is started.
const STARTED_CAPACITY: i64 = 1;
/// Capacity written to min/max/desired when a group is stopped.
const STOPPED_CAPACITY: i64 = 0;

pub struct AutoScalingGroupClient {
    client: AutoscalingClient,
}

#[derive(Debug, PartialEq)]
struct ScalingGroup {
    name: String,
    desired_capacity: i64,
    service: Option<String>,
}

impl ScalingGroup {
    fn from_group(group: AutoScalingGroup) -> ScalingGroup {
        let mut service = None;
        for tag in group.tags.unwrap_or_default() {
            if tag.key.as_deref() == Some(SERVICE_TAG_KEY) {
                service = tag.value;
            }
        }
        ScalingGroup {
            name: group.auto_scaling_group_name,
            desired_capacity: group.desired_capacity,
            service,
        }
    }

    fn serves(&self, target_service: &str) -> bool {
        self.service.as_deref() == Some(target_service)
    }
}

/// Status entry for one matching auto scaling group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatus {
    #[serde(rename = "AutoScalingGroupName")]
    pub name: String,
    #[serde(rename = "Size")]
    pub size: i64,
}

#[async_trait]
impl Control for AutoScalingGroupClient {
    async fn status(
        &self,
        target_service: &str,
    ) -> Result<Vec<ServiceStatus>, ControlResourceError> {
        let mut statuses = Vec::new();
        for group in self.matching_groups(target_service).await? {
            // Re-read by exact name so the reported size is current.
            if let Some(group) = self.fetch_group(&group.name).await? {
                statuses.push(ServiceStatus::Group(GroupStatus {
                    name: group.name,
                    size: group.desired_capacity,
                }));
            }
        }
        Ok(statuses)
    }

    async fn apply(
        &self,
        action: Action,
        target_service: &str,
    ) -> Result<Vec<String>, ControlResourceError> {
        match action {
            Action::Start => self.resize_matching(target_service, STARTED_CAPACITY).await,
            Action::Stop => self.resize_matching(target_service, STOPPED_CAPACITY).await,
            Action::Status => Ok(Vec::new()),
        }
    }
}

impl AutoScalingGroupClient {
    pub fn new(region: Region) -> Self {
        AutoScalingGroupClient {
            client: AutoscalingClient::new(region),
        }
    }

    fn new_with_client(client: AutoscalingClient) -> Self {
        AutoScalingGroupClient { client }
    }

    async fn describe_all_groups(&self) -> Result<Vec<ScalingGroup>, ControlResourceError> {
        let result = self
            .client
            .describe_auto_scaling_groups(AutoScalingGroupNamesType::default())
            .await?;
        Ok(result
            .auto_scaling_groups
            .into_iter()
            .map(ScalingGroup::from_group)
            .collect())
    }

    async fn matching_groups(
        &self,
        target_service: &str,
    ) -> Result<Vec<ScalingGroup>, ControlResourceError> {
        Ok(self
            .describe_all_groups()
            .await?
            .into_iter()
            .filter(|group| group.serves(target_service))
            .collect())
    }

    async fn fetch_group(&self, name: &str) -> Result<Option<ScalingGroup>, ControlResourceError> {
        let result = self
            .client
            .describe_auto_scaling_groups(AutoScalingGroupNamesType {
                auto_scaling_group_names: Some(vec![name.to_string()]),
                ..AutoScalingGroupNamesType::default()
            })
            .await?;
        Ok(result
            .auto_scaling_groups
            .into_iter()
            .find(|group| group.auto_scaling_group_name == name)
            .map(ScalingGroup::from_group))
    }

    /// Writes the capacity to min/max/desired of every matching group,
    /// regardless of its current size.
    async fn resize_matching(
        &self,
        target_service: &str,
        capacity: i64,
    ) -> Result<Vec<String>, ControlResourceError> {
        let mut resized = Vec::new();
        for group in self.matching_groups(target_service).await? {
            self.client
                .update_auto_scaling_group(UpdateAutoScalingGroupType {
                    auto_scaling_group_name: group.name.clone(),
                    min_size: Some(capacity),
                    max_size: Some(capacity),
                    desired_capacity: Some(capacity),
                    ..UpdateAutoScalingGroupType::default()
                })
                .await?;
            info!(
                "capacity {} requested for auto scaling group {}",
                capacity, group.name
            );
            resized.push(group.name);
        }
        Ok(resized)
    }
}
