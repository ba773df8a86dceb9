use aws_config::Region;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::config::Config;

/// Stores uploaded resume files in S3 (or MinIO when an endpoint is configured).
#[derive(Clone)]
pub struct ResumeStorage {
    s3: aws_sdk_s3::Client,
    bucket: String,
    endpoint: Option<String>,
}

impl ResumeStorage {
    /// Returns `None` when no bucket is configured; uploads are then skipped.
    pub async fn from_config(config: &Config) -> Option<Self> {
        let bucket = config.s3_bucket.clone()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"));
        if let Some(endpoint) = &config.s3_endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.s3_endpoint.is_some())
            .build();

        Some(Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            bucket,
            endpoint: config.s3_endpoint.clone(),
        })
    }

    /// Uploads a resume and returns its object URL.
    pub async fn upload_resume(
        &self,
        user_id: &str,
        file_name: &str,
        content_type: Option<&str>,
        bytes: bytes::Bytes,
    ) -> anyhow::Result<String> {
        let key = resume_key(user_id, file_name);

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type.unwrap_or("application/octet-stream"))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);
        Ok(object_url(self.endpoint.as_deref(), &self.bucket, &key))
    }
}

fn resume_key(user_id: &str, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("resumes/{user_id}/{safe_name}")
}

fn object_url(endpoint: Option<&str>, bucket: &str, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.amazonaws.com/{key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_is_scoped_and_sanitized() {
        assert_eq!(
            resume_key("uid-1", "../evil/cv.pdf"),
            "resumes/uid-1/.._evil_cv.pdf"
        );
    }

    #[test]
    fn test_object_url_for_custom_endpoint() {
        assert_eq!(
            object_url(Some("http://localhost:9000/"), "resumes", "resumes/u/cv.pdf"),
            "http://localhost:9000/resumes/resumes/u/cv.pdf"
        );
    }

    #[test]
    fn test_object_url_for_aws() {
        assert_eq!(
            object_url(None, "ascendra", "resumes/u/cv.pdf"),
            "https://ascendra.s3.amazonaws.com/resumes/u/cv.pdf"
        );
    }
}
