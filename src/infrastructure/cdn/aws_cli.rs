//! CloudFront backend via the AWS CLI

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::ports::{CdnBackend, CdnError, InvalidationStatus};

use super::super::aws_cli::AwsCli;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InvalidationBatch {
    paths: BatchPaths,
    caller_reference: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BatchPaths {
    quantity: usize,
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvalidationOutput {
    invalidation: InvalidationBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvalidationBody {
    id: String,
    status: String,
}

/// CloudFront distribution driven through `aws cloudfront`
#[derive(Debug, Clone, Default)]
pub struct AwsCliCdn {
    cli: AwsCli,
}

impl AwsCliCdn {
    pub fn new(profile: Option<String>) -> Self {
        Self {
            cli: AwsCli::new(profile),
        }
    }
}

/// Percent-encode each segment of a CDN path
///
/// CloudFront matches invalidation paths against encoded request URIs, so
/// `/my page.html` must be sent as `/my%20page.html`. `*` is left alone and
/// keeps its wildcard meaning.
fn encode_path(path: &str) -> Result<String, CdnError> {
    let mut url = Url::parse("https://cdn.invalid/")
        .map_err(|e| CdnError::Rejected(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| CdnError::Rejected(format!("cannot encode path '{}'", path)))?
        .clear()
        .extend(path.trim_start_matches('/').split('/'));
    Ok(url.path().to_string())
}

/// `--invalidation-batch` JSON; the caller reference must be unique per request
fn batch_json(paths: &[String], caller_reference: String) -> Result<String, CdnError> {
    let items = paths
        .iter()
        .map(|p| encode_path(p))
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string(&InvalidationBatch {
        paths: BatchPaths {
            quantity: items.len(),
            items,
        },
        caller_reference,
    })
    .map_err(|e| CdnError::Rejected(e.to_string()))
}

fn parse_output(stdout: &str) -> Result<InvalidationBody, CdnError> {
    let output: InvalidationOutput = serde_json::from_str(stdout)
        .map_err(|e| CdnError::UnexpectedResponse(e.to_string()))?;
    Ok(output.invalidation)
}

fn parse_status(status: &str) -> Result<InvalidationStatus, CdnError> {
    match status {
        "InProgress" => Ok(InvalidationStatus::InProgress),
        "Completed" => Ok(InvalidationStatus::Completed),
        other => Err(CdnError::UnexpectedResponse(format!(
            "unknown invalidation status '{}'",
            other
        ))),
    }
}

impl CdnBackend for AwsCliCdn {
    fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
    ) -> Result<String, CdnError> {
        let caller_reference = format!("cachet-{}", Utc::now().format("%Y%m%dT%H%M%S%.6fZ"));
        let batch = batch_json(paths, caller_reference)?;

        let cmd = self.cli.command([
            "cloudfront",
            "create-invalidation",
            "--distribution-id",
            distribution_id,
            "--invalidation-batch",
            &batch,
            "--output",
            "json",
        ]);
        let stdout = self.cli.run(cmd).map_err(CdnError::CommandFailed)?;
        let body = parse_output(&stdout)?;
        debug!(id = %body.id, status = %body.status, "created invalidation");
        Ok(body.id)
    }

    fn get_invalidation_status(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<InvalidationStatus, CdnError> {
        let cmd = self.cli.command([
            "cloudfront",
            "get-invalidation",
            "--distribution-id",
            distribution_id,
            "--id",
            invalidation_id,
            "--output",
            "json",
        ]);
        let stdout = self.cli.run(cmd).map_err(CdnError::CommandFailed)?;
        parse_status(&parse_output(&stdout)?.status)
    }
}
