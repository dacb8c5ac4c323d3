use std::{collections::HashMap, sync::LazyLock};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("no API endpoints registered for host '{0}'")]
    UnsupportedHost(String),
}

/// URL templates for one repository host
#[derive(Debug)]
pub struct EndpointSet {
    upload: &'static str,
    delete: &'static str,
}

impl EndpointSet {
    pub fn upload_url(&self, channel: &str) -> String {
        self.upload.replace("{channel}", channel)
    }

    pub fn delete_url(&self, channel: &str, subdir: &str, pkg: &str) -> String {
        self.delete
            .replace("{channel}", channel)
            .replace("{subdir}", subdir)
            .replace("{pkg}", pkg)
    }
}

static API_ENDPOINTS: LazyLock<HashMap<&'static str, EndpointSet>> = LazyLock::new(|| {
    HashMap::from([(
        "repo.prefix.dev",
        EndpointSet {
            upload: "https://prefix.dev/api/v1/upload/{channel}",
            delete: "https://prefix.dev/api/v1/delete/{channel}/{subdir}/{pkg}",
        },
    )])
});

/// look up the endpoint set for a host
pub fn endpoints_for(host: &str) -> Result<&'static EndpointSet, EndpointError> {
    API_ENDPOINTS
        .get(host)
        .ok_or_else(|| EndpointError::UnsupportedHost(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_substitutes_channel() {
        let endpoints = endpoints_for("repo.prefix.dev").unwrap();
        assert_eq!(
            endpoints.upload_url("vidlg"),
            "https://prefix.dev/api/v1/upload/vidlg"
        );
    }

    #[test]
    fn delete_url_substitutes_all_parts() {
        let endpoints = endpoints_for("repo.prefix.dev").unwrap();
        assert_eq!(
            endpoints.delete_url("vidlg", "linux-64", "foo-1.0-0.tar.bz2"),
            "https://prefix.dev/api/v1/delete/vidlg/linux-64/foo-1.0-0.tar.bz2"
        );
    }

    #[test]
    fn unknown_host_is_an_error() {
        let err = endpoints_for("conda.anaconda.org").unwrap_err();
        assert!(matches!(err, EndpointError::UnsupportedHost(host) if host == "conda.anaconda.org"));
    }
}
