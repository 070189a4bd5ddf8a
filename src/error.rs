use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllyError {
    // AWS Errors
    #[error("AWS EC2 error: {0}")]
    Ec2(String),

    #[error("AWS credentials not found or invalid")]
    AwsCredentials,

    // Filtering/Selection Errors
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("'{0}' is not a valid selection")]
    InvalidSelection(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    // Dispatch Errors
    #[error("This command doesn't support connecting to multiple instances")]
    MultiTargetUnsupported,

    #[error("SSH command failed: {0}")]
    SshCommand(String),

    #[error("SCP transfer failed: {0}")]
    ScpTransfer(String),

    // Config Errors
    #[error("Configuration error: {0}")]
    Config(String),

    // File/IO Errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

macro_rules! format_sdk_error {
    ($sdk:ident, $err:expr) => {{
        use $sdk::error::SdkError;
        match &$err {
            SdkError::ServiceError(service_err) => format!("{:?}", service_err.err()),
            SdkError::TimeoutError(_) => "Request timed out".to_string(),
            SdkError::DispatchFailure(dispatch) => {
                if dispatch.is_io() {
                    "Network error - please check your connection".to_string()
                } else if dispatch.is_timeout() {
                    "Connection timed out".to_string()
                } else {
                    format!("Connection error: {:?}", dispatch)
                }
            }
            SdkError::ConstructionFailure(_) => "Failed to construct request".to_string(),
            SdkError::ResponseError(resp) => format!("Response error: {:?}", resp),
            _ => $err.to_string(),
        }
    }};
}

impl AllyError {
    pub fn ec2<E, R>(err: aws_sdk_ec2::error::SdkError<E, R>) -> Self
    where
        E: std::fmt::Debug,
        R: std::fmt::Debug,
    {
        AllyError::Ec2(format_sdk_error!(aws_sdk_ec2, err))
    }
}

pub type Result<T> = std::result::Result<T, AllyError>;
