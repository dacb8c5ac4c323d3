mod package;

use std::time::Instant;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::endpoints::EndpointError;

pub use package::{DeleteTarget, UploadRequest, MAX_PKG_SIZE};

#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("package path '{0}' has no subdir/name components")]
    MalformedPackagePath(String),
    #[error("package path '{0}' has no usable file name")]
    InvalidUploadName(String),
}

type Result<T> = std::result::Result<T, HttpClientError>;

/// token/repo/channel triple resolved once per invocation and
/// applied to every request made during it
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub host: String,
    pub channel: String,
    pub token: String,
}

pub struct HttpClient {
    ctx: ApiContext,
    client: Client,
}

impl HttpClient {
    pub fn init(ctx: ApiContext) -> Self {
        let client = Client::new();
        Self { client, ctx }
    }

    /// test and time connection to the repository host's web root
    pub async fn ping(&self) -> Result<Option<u128>> {
        let start = Instant::now();
        let res = self
            .client
            .get(format!("https://{}", self.ctx.host))
            .send()
            .await?;
        let time = start.elapsed().as_millis();
        Ok(if res.status() == StatusCode::OK { Some(time) } else { None })
    }
}
