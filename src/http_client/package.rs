use std::path::Path;

use bytes::Bytes;
use log::debug;
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    StatusCode,
};
use sha2::{Digest, Sha256};

use crate::endpoints::endpoints_for;

use super::{HttpClient, HttpClientError, Result};

/// packages above this size are not uploaded
pub const MAX_PKG_SIZE: usize = 100 * 1024 * 1024;

/// an upload payload: file name, digest, and raw bytes
#[derive(Debug)]
pub struct UploadRequest {
    name: String,
    sha256: String,
    body: Bytes,
}

impl UploadRequest {
    /// Prepare an upload from a package path and its file contents.
    /// Returns `None` when the file exceeds [`MAX_PKG_SIZE`].
    pub fn prepare(path: &Path, body: Bytes) -> Result<Option<Self>> {
        if body.len() > MAX_PKG_SIZE {
            return Ok(None);
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HttpClientError::InvalidUploadName(path.display().to_string()))?
            .to_string();

        let mut hasher = Sha256::new();
        hasher.update(&body);
        let sha256 = format!("{:x}", hasher.finalize());

        Ok(Some(Self { name, sha256, body }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn content_length(&self) -> String {
        self.body.len().to_string()
    }
}

/// a package to delete, addressed by the last two components of its path
#[derive(Debug)]
pub struct DeleteTarget {
    pub subdir: String,
    pub pkg: String,
}

impl DeleteTarget {
    /// Derive subdir and package name from a path-like string.
    /// Only the final two components are used; any leading ones are dropped.
    pub fn from_path(path: &Path) -> Result<Self> {
        let malformed = || HttpClientError::MalformedPackagePath(path.display().to_string());

        let pkg = path.file_name().and_then(|n| n.to_str()).ok_or_else(malformed)?;
        let subdir = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .ok_or_else(malformed)?;

        Ok(Self {
            subdir: subdir.to_string(),
            pkg: pkg.to_string(),
        })
    }
}

impl HttpClient {
    /// upload URL for this invocation's host and channel
    pub fn upload_url(&self) -> Result<String> {
        Ok(endpoints_for(&self.ctx.host)?.upload_url(&self.ctx.channel))
    }

    /// delete URL for one package on this invocation's host and channel
    pub fn delete_url(&self, target: &DeleteTarget) -> Result<String> {
        Ok(endpoints_for(&self.ctx.host)?.delete_url(&self.ctx.channel, &target.subdir, &target.pkg))
    }

    /// POST one package; returns the HTTP status unchanged, 2xx or not
    pub async fn upload_package(&self, req: &UploadRequest) -> Result<StatusCode> {
        let url = self.upload_url()?;
        self.post_package(&url, req).await
    }

    /// DELETE one package; returns the HTTP status unchanged, 2xx or not
    pub async fn delete_package(&self, target: &DeleteTarget) -> Result<StatusCode> {
        let url = self.delete_url(target)?;
        self.delete_at(&url).await
    }

    async fn post_package(&self, url: &str, req: &UploadRequest) -> Result<StatusCode> {
        debug!("POST {} ({} bytes)", url, req.body.len());

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.ctx.token)
            .header("X-File-Name", req.name())
            .header("X-File-SHA256", req.sha256())
            .header(CONTENT_LENGTH, req.content_length())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(req.body.clone())
            .send()
            .await?;

        Ok(res.status())
    }

    async fn delete_at(&self, url: &str) -> Result<StatusCode> {
        debug!("DELETE {}", url);

        let res = self
            .client
            .delete(url)
            .bearer_auth(&self.ctx.token)
            .send()
            .await?;

        Ok(res.status())
    }
}
