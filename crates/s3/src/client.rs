//! S3 backend implementation
//!
//! Wraps aws-sdk-s3 and implements the Backend trait from stash-core.
//! Signing, retries and timeouts stay inside the SDK; this module only maps
//! the four backend capabilities onto S3 requests.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use aws_smithy_types::retry::RetryConfig;
use aws_smithy_types::timeout::TimeoutConfig;
use bytes::Bytes;
use stash_core::{Backend, BackendError, BackendResult, ClientConfig, ObjectPath, Result};

/// Error codes S3-compatible services use for a missing key
const NOT_FOUND_CODES: &[&str] = &["NotFound", "NoSuchKey", "NoSuchBucket"];

/// Error codes for rejected credentials or permissions
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "AllAccessDisabled",
];

/// S3 backend bound to one bucket
pub struct S3Backend {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Backend {
    /// Create a new S3 backend from client configuration
    pub async fn new(config: &ClientConfig, bucket: impl Into<String>) -> Result<Self> {
        config.validate()?;

        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            config.credentials.key.clone(),
            config.credentials.secret.clone(),
            None, // session token
            None, // expiry
            "stash-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let Some(max_attempts) = config.max_attempts {
            loader = loader.retry_config(RetryConfig::standard().with_max_attempts(max_attempts));
        }

        if let Some(secs) = config.timeout_secs {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        let bucket = bucket.into();
        tracing::debug!(
            bucket = %bucket,
            region = %config.region,
            version = %config.version,
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            "Built S3 client"
        );

        Ok(Self::from_client(
            aws_sdk_s3::Client::from_conf(s3_config),
            bucket,
        ))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            inner: client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E>(error: &SdkError<E, HttpResponse>) -> String
    where
        E: ProvideErrorMetadata + std::fmt::Display,
    {
        match error {
            SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let mut msg = format!("Service error: {err}");
                if let Some(code) = err.code() {
                    msg.push_str(&format!(" (code: {code})"));
                }
                msg
            }
            SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {err:?}")
            }
            SdkError::TimeoutError(_) => "Request timeout".to_string(),
            SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {err:?}")
            }
            SdkError::ResponseError(err) => {
                format!("Response error: {err:?}")
            }
            _ => error.to_string(),
        }
    }

    /// Map an SDK failure onto the backend error kinds
    fn classify<E>(error: &SdkError<E, HttpResponse>, path: &ObjectPath) -> BackendError
    where
        E: ProvideErrorMetadata + std::fmt::Display,
    {
        let msg = format!("{path}: {}", Self::format_sdk_error(error));

        if matches!(
            error,
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_)
        ) {
            return BackendError::Network(msg);
        }

        let status = error.raw_response().map(|r| r.status().as_u16());
        let code = error.as_service_error().and_then(|e| e.code());

        if status == Some(404) || code.is_some_and(|c| NOT_FOUND_CODES.contains(&c)) {
            BackendError::NotFound(msg)
        } else if matches!(status, Some(401 | 403))
            || code.is_some_and(|c| ACCESS_DENIED_CODES.contains(&c))
        {
            BackendError::AccessDenied(msg)
        } else if status.is_some_and(|s| s >= 500) {
            BackendError::Network(msg)
        } else {
            BackendError::Other(msg)
        }
    }
}

#[async_trait]
impl Backend for S3Backend {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn has(&self, path: &ObjectPath) -> BackendResult<bool> {
        let head = self
            .inner
            .head_object()
            .bucket(&self.bucket)
            .key(path.as_str())
            .send()
            .await;

        match head {
            Ok(_) => return Ok(true),
            Err(e) => {
                let err = Self::classify(&e, path);
                if !err.is_not_found() {
                    return Err(err);
                }
            }
        }

        // No object under the exact key; look for a directory prefix
        let response = self
            .inner
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(path.dir_marker())
            .max_keys(1)
            .send()
            .await
            .map_err(|e| Self::classify(&e, path))?;

        Ok(response.key_count().unwrap_or(0) > 0
            || !response.contents().is_empty()
            || !response.common_prefixes().is_empty())
    }

    async fn create_dir(&self, path: &ObjectPath) -> BackendResult<()> {
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(path.dir_marker())
            .body(ByteStream::from_static(b""))
            .send()
            .await
            .map_err(|e| Self::classify(&e, path))?;

        Ok(())
    }

    async fn write(&self, path: &ObjectPath, data: Bytes) -> BackendResult<()> {
        let content_type = mime_guess::from_path(path.as_str())
            .first_or_octet_stream()
            .to_string();
        let size = data.len();

        let response = self
            .inner
            .put_object()
            .bucket(&self.bucket)
            .key(path.as_str())
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| Self::classify(&e, path))?;

        tracing::trace!(
            key = %path,
            size,
            etag = response.e_tag().map(|s| s.trim_matches('"')).unwrap_or_default(),
            "PutObject completed"
        );

        Ok(())
    }

    async fn read(&self, path: &ObjectPath) -> BackendResult<Bytes> {
        let response = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(path.as_str())
            .send()
            .await
            .map_err(|e| Self::classify(&e, path))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| BackendError::Network(format!("{path}: {e}")))?
            .into_bytes();

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::operation::head_object::HeadObjectError;
    use aws_sdk_s3::types::error::{NoSuchKey, NotFound};
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use aws_smithy_types::error::ErrorMetadata;
    use stash_core::Credentials;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn client_config() -> ClientConfig {
        ClientConfig {
            credentials: Credentials {
                key: "minio".to_string(),
                secret: "minio123".to_string(),
            },
            region: "us-east-1".to_string(),
            version: "latest".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            force_path_style: true,
            max_attempts: Some(2),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_classify_head_not_found() {
        let err: SdkError<HeadObjectError, HttpResponse> = SdkError::service_error(
            HeadObjectError::NotFound(NotFound::builder().build()),
            response(404),
        );
        let classified = S3Backend::classify(&err, &ObjectPath::new("a/b"));
        assert!(classified.is_not_found());
    }

    #[test]
    fn test_classify_get_no_such_key() {
        let err: SdkError<GetObjectError, HttpResponse> = SdkError::service_error(
            GetObjectError::NoSuchKey(NoSuchKey::builder().build()),
            response(404),
        );
        let classified = S3Backend::classify(&err, &ObjectPath::new("a/b"));
        assert!(matches!(classified, BackendError::NotFound(msg) if msg.starts_with("a/b:")));
    }

    #[test]
    fn test_classify_access_denied() {
        let err: SdkError<GetObjectError, HttpResponse> = SdkError::service_error(
            GetObjectError::generic(ErrorMetadata::builder().code("AccessDenied").build()),
            response(403),
        );
        let classified = S3Backend::classify(&err, &ObjectPath::new("secret"));
        assert!(matches!(classified, BackendError::AccessDenied(msg) if msg.contains("AccessDenied")));
    }

    #[test]
    fn test_classify_server_error() {
        let err: SdkError<GetObjectError, HttpResponse> = SdkError::service_error(
            GetObjectError::generic(ErrorMetadata::builder().code("SlowDown").build()),
            response(503),
        );
        let classified = S3Backend::classify(&err, &ObjectPath::new("p"));
        assert!(matches!(classified, BackendError::Network(_)));
    }

    #[test]
    fn test_classify_timeout() {
        let err: SdkError<GetObjectError, HttpResponse> = SdkError::timeout_error("deadline");
        let classified = S3Backend::classify(&err, &ObjectPath::new("p"));
        assert!(matches!(classified, BackendError::Network(msg) if msg.contains("Request timeout")));
    }

    #[tokio::test]
    async fn test_new_binds_bucket() {
        let backend = S3Backend::new(&client_config(), "media").await.unwrap();
        assert_eq!(backend.name(), "s3");
        assert_eq!(backend.bucket(), "media");
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = client_config();
        config.version = "2010-01-01".to_string();
        let result = S3Backend::new(&config, "media").await;
        assert!(matches!(result, Err(stash_core::Error::Config(_))));
    }
}
