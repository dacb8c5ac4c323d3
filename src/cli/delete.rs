use std::path::PathBuf;

use indicatif::MultiProgress;

use super::status_spinner::StatusSpinner;
use crate::http_client::{DeleteTarget, HttpClient};

pub async fn handle(pkgs: Vec<PathBuf>, client: &HttpClient, multi: &MultiProgress) -> super::Result {
    for pkg in pkgs {
        let target = DeleteTarget::from_path(&pkg)?;
        let url = client.delete_url(&target)?;

        let status = StatusSpinner::new(&format!("Deleting {} at {}...", target.pkg, url), multi);
        let code = client.delete_package(&target).await?;
        status.finish_status(&format!("Deleted {} with status {}", target.pkg, code), code);
    }

    Ok(())
}
