//! AWS Systems Manager backend for aws-parameter-store
//!
//! [`SsmStore`] implements [`ParameterStore`] on top of the AWS SDK. The SDK
//! is async; every call is driven to completion on a private current-thread
//! runtime so the synchronizer stays blocking and sequential.

mod error;

pub use error::{Error, Result};

use std::fmt::Debug;

use aws_sdk_ssm::Client;
use aws_sdk_ssm::config::Region;
use aws_sdk_ssm::error::{DisplayErrorContext, SdkError};
use aws_sdk_ssm::types::ParameterType as SdkParameterType;
use pstore_core::{
    DeleteOutcome, Page, Parameter, ParameterMetadata, ParameterStore, ParameterType, PathQuery,
    PutParameter, StoreError, StoreResult,
};
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Runtime};

/// Connection settings for the SSM client.
///
/// Unset fields fall back to the SDK's default provider chain
/// (`AWS_REGION`, `AWS_PROFILE`, shared config files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Override the service endpoint, e.g. a LocalStack instance
    pub endpoint_url: Option<String>,
}

/// Parameter store backed by AWS Systems Manager.
pub struct SsmStore {
    client: Client,
    runtime: Runtime,
}

impl SsmStore {
    /// Resolve AWS configuration and build a client.
    ///
    /// Credentials are resolved lazily by the SDK; a missing or invalid
    /// credential surfaces on the first call, not here.
    pub fn connect(options: &ClientOptions) -> Result<Self> {
        let runtime = new_runtime()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = runtime.block_on(loader.load());
        tracing::debug!(
            region = ?config.region().map(|r| r.as_ref().to_string()),
            endpoint = ?options.endpoint_url,
            "Configured SSM client"
        );

        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Result<Self> {
        Ok(Self {
            client,
            runtime: new_runtime()?,
        })
    }
}

fn new_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)
}

impl ParameterStore for SsmStore {
    fn get_parameter(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        let request = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(decrypt)
            .send();

        let output = self.runtime.block_on(request).map_err(|err| match err.as_service_error() {
            Some(e) if e.is_parameter_not_found() => StoreError::ParameterNotFound {
                name: name.to_string(),
            },
            _ => remote_error("GetParameter", &err),
        })?;

        let parameter = output.parameter().ok_or_else(|| StoreError::ParameterNotFound {
            name: name.to_string(),
        })?;
        to_parameter(parameter)
    }

    fn put_parameter(&self, request: &PutParameter) -> StoreResult<i64> {
        let call = self
            .client
            .put_parameter()
            .name(&request.name)
            .value(&request.value)
            .r#type(to_sdk_type(request.storage.parameter_type()))
            .set_key_id(request.storage.key_id().map(str::to_string))
            .overwrite(request.overwrite)
            .send();

        let output = self.runtime.block_on(call).map_err(|err| match err.as_service_error() {
            Some(e) if e.is_parameter_already_exists() => StoreError::AlreadyExists {
                name: request.name.clone(),
            },
            _ => remote_error("PutParameter", &err),
        })?;

        Ok(output.version())
    }

    fn get_parameters_by_path(&self, query: &PathQuery) -> StoreResult<Page<Parameter>> {
        let call = self
            .client
            .get_parameters_by_path()
            .path(&query.path)
            .recursive(query.recursive)
            .with_decryption(query.decrypt)
            .set_max_results(query.page_size.map(i32::from))
            .set_next_token(query.next_token.clone())
            .send();

        let output = self
            .runtime
            .block_on(call)
            .map_err(|err| remote_error("GetParametersByPath", &err))?;

        let items = output
            .parameters()
            .iter()
            .map(to_parameter)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn delete_parameters(&self, names: &[String]) -> StoreResult<DeleteOutcome> {
        let call = self
            .client
            .delete_parameters()
            .set_names(Some(names.to_vec()))
            .send();

        let output = self
            .runtime
            .block_on(call)
            .map_err(|err| remote_error("DeleteParameters", &err))?;

        Ok(DeleteOutcome {
            deleted: output.deleted_parameters().to_vec(),
            invalid: output.invalid_parameters().to_vec(),
        })
    }

    fn describe_parameters(
        &self,
        page_size: Option<u8>,
        next_token: Option<&str>,
    ) -> StoreResult<Page<ParameterMetadata>> {
        let call = self
            .client
            .describe_parameters()
            .set_max_results(page_size.map(i32::from))
            .set_next_token(next_token.map(str::to_string))
            .send();

        let output = self
            .runtime
            .block_on(call)
            .map_err(|err| remote_error("DescribeParameters", &err))?;

        let items = output
            .parameters()
            .iter()
            .map(|meta| {
                Ok(ParameterMetadata {
                    name: meta.name().unwrap_or_default().to_string(),
                    parameter_type: from_sdk_type(meta.r#type())?,
                    key_id: meta.key_id().map(str::to_string),
                    version: meta.version(),
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

fn to_parameter(parameter: &aws_sdk_ssm::types::Parameter) -> StoreResult<Parameter> {
    Ok(Parameter {
        name: parameter.name().unwrap_or_default().to_string(),
        value: parameter.value().unwrap_or_default().to_string(),
        parameter_type: from_sdk_type(parameter.r#type())?,
        version: parameter.version(),
    })
}

fn remote_error<E, R>(operation: &'static str, err: &SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    let message = DisplayErrorContext(err).to_string();
    tracing::debug!(operation, %message, "SSM call failed");
    StoreError::remote(operation, message)
}

fn to_sdk_type(parameter_type: ParameterType) -> SdkParameterType {
    match parameter_type {
        ParameterType::String => SdkParameterType::String,
        ParameterType::StringList => SdkParameterType::StringList,
        ParameterType::SecureString => SdkParameterType::SecureString,
    }
}

fn from_sdk_type(parameter_type: Option<&SdkParameterType>) -> StoreResult<ParameterType> {
    match parameter_type {
        None | Some(SdkParameterType::String) => Ok(ParameterType::String),
        Some(SdkParameterType::StringList) => Ok(ParameterType::StringList),
        Some(SdkParameterType::SecureString) => Ok(ParameterType::SecureString),
        Some(other) => Err(StoreError::InvalidRequest {
            message: format!("unsupported parameter type '{}'", other.as_str()),
        }),
    }
}
