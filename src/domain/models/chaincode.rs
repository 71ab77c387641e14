//! Chaincode Domain Model
//!
//! Identifiers, requests and submissions for the chaincode lifecycle.

use validator::Validate;

use crate::domain::models::channel::ChannelName;
use crate::shared::errors::DomainError;

/// Newtype wrapper for a chaincode version
///
/// Uniqueness per install is enforced by the network, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChaincodeVersion(String);

impl ChaincodeVersion {
    /// Parse a chaincode version
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChaincodeVersion` for empty versions or
    /// versions containing whitespace.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidChaincodeVersion(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChaincodeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Installed or instantiated contract: (name, version, channel)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChaincodeInstance {
    pub name: String,
    pub version: ChaincodeVersion,
    pub channel: ChannelName,
}

impl std::fmt::Display for ChaincodeInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}@{}", self.name, self.version, self.channel)
    }
}

/// Invocation arguments, serialized as `{"Args":[...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChaincodeArgs {
    args: Vec<String>,
}

impl ChaincodeArgs {
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a JSON payload such as `{"Args":["init"]}` or a bare `["init"]`
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the payload is neither form.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Payload {
            Wrapped {
                #[serde(rename = "Args")]
                args: Vec<String>,
            },
            Bare(Vec<String>),
        }

        let args = match serde_json::from_str::<Payload>(payload)? {
            Payload::Wrapped { args } | Payload::Bare(args) => args,
        };
        Ok(Self { args })
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// JSON payload passed to the network command interface
    #[must_use]
    pub fn to_payload(&self) -> String {
        serde_json::json!({ "Args": self.args }).to_string()
    }
}

/// Request naming a chaincode for build and test
#[derive(Debug, Clone, Default, Validate)]
pub struct ChaincodeNameRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
}

/// Request for `install(name, version, path)`
#[derive(Debug, Clone, Default, Validate)]
pub struct InstallRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "is required"))]
    pub version: String,

    #[validate(length(min = 1, message = "is required"))]
    pub path: String,
}

/// Request for `instantiate` and `upgrade` of (name, version, channel)
#[derive(Debug, Clone, Default, Validate)]
pub struct DeployRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "is required"))]
    pub version: String,

    #[validate(length(min = 1, message = "is required"))]
    pub channel: String,
}

impl DeployRequest {
    /// Resolve the request into a chaincode instance
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` for malformed channel names or versions.
    pub fn instance(&self) -> Result<ChaincodeInstance, DomainError> {
        Ok(ChaincodeInstance {
            name: self.name.clone(),
            version: ChaincodeVersion::parse(&self.version)?,
            channel: ChannelName::parse(&self.channel)?,
        })
    }
}

/// Request for one-shot invoke and query calls
#[derive(Debug, Clone, Default, Validate)]
pub struct CallRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub channel: String,

    #[validate(length(min = 1, message = "is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "is required"))]
    pub args: String,
}

/// Install submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeInstall {
    pub name: String,
    pub version: ChaincodeVersion,
    pub path: String,
}

/// Instantiate/upgrade submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeDeployment {
    pub instance: ChaincodeInstance,
    pub args: ChaincodeArgs,
    pub endorsement_policy: Option<String>,
}

/// Invoke/query submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeCall {
    pub channel: String,
    pub name: String,
    pub args: ChaincodeArgs,
}
