use aws_sdk_ec2::types::{Filter, Instance};

use super::super::client::AwsClients;
use crate::{AllyError, Result};

/// Fetch a snapshot of every instance in the `running` state.
///
/// One read-only DescribeInstances query; reservations are flattened into
/// a single list. No ordering is assumed from the provider.
pub async fn running_instances(clients: &AwsClients) -> Result<Vec<Instance>> {
    let result = clients
        .ec2
        .describe_instances()
        .filters(
            Filter::builder()
                .name("instance-state-name")
                .values("running")
                .build(),
        )
        .send()
        .await
        .map_err(AllyError::ec2)?;

    let mut instances = Vec::new();
    for reservation in result.reservations() {
        instances.extend(reservation.instances().iter().cloned());
    }

    Ok(instances)
}

/// Get tag value from instance; the first occurrence wins for a
/// duplicated key.
pub fn get_tag_value(instance: &Instance, key: &str) -> Option<String> {
    instance
        .tags()
        .iter()
        .find(|t| t.key() == Some(key))
        .and_then(|t| t.value().map(String::from))
}
