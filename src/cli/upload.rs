use std::path::PathBuf;

use bytes::Bytes;
use console::style;
use indicatif::MultiProgress;
use log::warn;
use tokio::fs::read;

use super::status_spinner::StatusSpinner;
use crate::http_client::{HttpClient, UploadRequest};

pub async fn handle(pkgs: Vec<PathBuf>, client: &HttpClient, multi: &MultiProgress) -> super::Result {
    // unsupported hosts fail here, before any file is touched
    let upload_url = client.upload_url()?;

    for pkg in pkgs {
        let data = Bytes::from(read(&pkg).await?);

        let Some(request) = UploadRequest::prepare(&pkg, data)? else {
            warn!("{} exceeds the maximum package size", pkg.display());
            println!(
                "{} {} {}",
                style("Skipping").yellow(),
                style(pkg.display()).magenta().bold(),
                style("because it is too large").yellow()
            );
            // matches the original tool: one oversized package abandons
            // the rest of the batch
            break;
        };

        let status = StatusSpinner::new(
            &format!("Uploading {} to {}...", request.name(), upload_url),
            multi,
        );
        let code = client.upload_package(&request).await?;
        status.finish_status(
            &format!("Uploaded {} with status {}", request.name(), code),
            code,
        );
    }

    Ok(())
}
