use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_sts::Client as StsClient;

use crate::{AllyError, Result};

/// AWS client wrapper holding the service clients
#[derive(Clone)]
pub struct AwsClients {
    pub ec2: Ec2Client,
}

impl AwsClients {
    /// Create new AWS clients from the default provider chain, optionally
    /// pinned to a specific region.
    pub async fn new(region: Option<&str>) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;

        // No resolvable region means the environment is not set up
        if config.region().is_none() {
            return Err(AllyError::AwsCredentials);
        }

        let ec2 = Ec2Client::new(&config);
        let sts = StsClient::new(&config);

        // Verify credentials before issuing any EC2 calls
        sts.get_caller_identity()
            .send()
            .await
            .map_err(|_| AllyError::AwsCredentials)?;

        Ok(Self { ec2 })
    }
}

/// Tag the EC2 console uses for the human-readable instance name
pub const NAME_TAG_KEY: &str = "Name";
