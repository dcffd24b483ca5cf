//! S3 storage backend via the AWS CLI
//!
//! - list: `aws s3api list-objects-v2` (the CLI paginates for us)
//! - put:  `aws s3 cp <tmp> s3://bucket/key --cache-control …`
//! - delete: `aws s3 rm s3://bucket/key`
//!
//! S3 ETags are not SHA-256 digests, so listings carry no content hash
//! and every upload goes through.

use std::io::Write;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::entities::RemoteListing;
use crate::domain::ports::{StorageBackend, StorageError};
use crate::domain::value_objects::AssetPath;

use super::super::aws_cli::AwsCli;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListObjectsOutput {
    #[serde(default)]
    contents: Vec<ListedObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListedObject {
    key: String,
}

/// S3 bucket driven through `aws s3`
#[derive(Debug, Clone)]
pub struct AwsCliStorage {
    cli: AwsCli,
    bucket: String,
    prefix: String,
}

impl AwsCliStorage {
    /// `prefix` is the key namespace inside the bucket (e.g. `site/`)
    pub fn new(bucket: impl Into<String>, prefix: &str, profile: Option<String>) -> Self {
        let prefix = prefix.trim_matches('/');
        Self {
            cli: AwsCli::new(profile),
            bucket: bucket.into(),
            prefix: if prefix.is_empty() {
                String::new()
            } else {
                format!("{}/", prefix)
            },
        }
    }

    fn key(&self, path: &AssetPath) -> String {
        format!("{}{}", self.prefix, path)
    }

    fn uri(&self, path: &AssetPath) -> String {
        format!("s3://{}/{}", self.bucket, self.key(path))
    }
}

/// Parse `list-objects-v2 --output json`, stripping the key prefix
fn parse_listing(stdout: &str, prefix: &str) -> Result<RemoteListing, StorageError> {
    // An empty bucket prints nothing at all
    if stdout.trim().is_empty() {
        return Ok(RemoteListing::new());
    }
    let output: ListObjectsOutput = serde_json::from_str(stdout)
        .map_err(|e| StorageError::ListFailed(format!("unexpected list output: {}", e)))?;

    Ok(output
        .contents
        .into_iter()
        .filter(|obj| !obj.key.ends_with('/'))
        .filter_map(|obj| {
            let rel = obj.key.strip_prefix(prefix)?;
            canonical_path(&obj.key, rel)
        })
        .collect())
}

/// Keys are only usable when they survive normalization unchanged; a
/// rewritten key (`a//b` -> `a/b`) would make a later delete miss the real
/// object, so such keys are left out of the listing entirely.
fn canonical_path(key: &str, rel: &str) -> Option<AssetPath> {
    match AssetPath::new(rel) {
        Ok(path) if path.as_str() == rel => Some(path),
        Ok(path) => {
            warn!(%key, normalized = %path, "skipping non-canonical object key");
            None
        }
        Err(e) => {
            warn!(%key, error = %e, "skipping unusable object key");
            None
        }
    }
}

impl StorageBackend for AwsCliStorage {
    fn display_name(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.prefix)
    }

    fn list_remote_objects(&self, prefix: &str) -> Result<RemoteListing, StorageError> {
        if !AwsCli::check_available() {
            return Err(StorageError::NotAvailable("aws CLI not found in PATH".into()));
        }
        let full_prefix = format!("{}{}", self.prefix, prefix);
        let cmd = self.cli.command([
            "s3api",
            "list-objects-v2",
            "--bucket",
            &self.bucket,
            "--prefix",
            &full_prefix,
            "--output",
            "json",
        ]);
        let stdout = self.cli.run(cmd).map_err(StorageError::ListFailed)?;
        let listing = parse_listing(&stdout, &self.prefix)?;
        debug!(bucket = %self.bucket, objects = listing.len(), "listed bucket");
        Ok(listing)
    }

    fn put_object(
        &self,
        path: &AssetPath,
        bytes: &[u8],
        cache_control: &str,
    ) -> Result<(), StorageError> {
        // Keep the extension so the CLI guesses the content type
        let suffix = path.extension().map(|e| format!(".{}", e)).unwrap_or_default();
        let mut tmp = tempfile::Builder::new()
            .prefix("cachet-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| StorageError::put(path, e.to_string()))?;
        tmp.write_all(bytes)
            .and_then(|_| tmp.flush())
            .map_err(|e| StorageError::put(path, e.to_string()))?;

        let mut cmd = self.cli.command(["s3", "cp"]);
        cmd.arg(tmp.path())
            .arg(self.uri(path))
            .arg("--cache-control")
            .arg(cache_control)
            .arg("--only-show-errors");
        self.cli
            .run(cmd)
            .map_err(|message| StorageError::put(path, message))?;
        Ok(())
    }

    fn delete_object(&self, path: &AssetPath) -> Result<(), StorageError> {
        let mut cmd = self.cli.command(["s3", "rm"]);
        cmd.arg(self.uri(path)).arg("--only-show-errors");
        self.cli
            .run(cmd)
            .map_err(|message| StorageError::delete(path, message))?;
        Ok(())
    }
}
