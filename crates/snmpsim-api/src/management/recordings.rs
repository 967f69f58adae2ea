// Management API record file endpoints
//
// Record files are addressed by a path under the simulation data root
// rather than by numeric id. Content goes over the wire as plain text.

use std::path::Path;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::ManagementClient;
use crate::management::models::Recording;

/// Suffix every record file path must carry.
pub const RECORD_FILE_EXTENSION: &str = ".snmprec";

/// Trim surrounding whitespace and require the record file suffix.
///
/// Fails locally; no request is made for a non-conforming path.
pub fn validate_record_path(path: &str) -> Result<&str, Error> {
    let trimmed = path.trim();
    if trimmed.ends_with(RECORD_FILE_EXTENSION) {
        Ok(trimmed)
    } else {
        Err(Error::NotRecordFile {
            path: path.to_owned(),
        })
    }
}

fn text_plain() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers
}

impl ManagementClient {
    /// List record files known to the service.
    ///
    /// `GET recordings`
    pub async fn get_record_files(
        &self,
        filter: Option<&Filter>,
    ) -> Result<Vec<Recording>, Error> {
        self.list("recordings", filter).await
    }

    /// Fetch the contents of the record file at `remote_path`.
    ///
    /// `GET recordings/{remote_path}`
    pub async fn get_record_file(&self, remote_path: &str) -> Result<String, Error> {
        let remote_path = validate_record_path(remote_path)?;
        self.transport()
            .fetch_text(
                Method::GET,
                &Self::path(&format!("recordings/{remote_path}")),
                Some(text_plain()),
                StatusCode::OK,
            )
            .await
    }

    /// Read a local `.snmprec` file and store it at `remote_path`.
    ///
    /// The local path is trimmed like a remote one before it is read.
    pub async fn upload_record_file(
        &self,
        local_path: impl AsRef<Path>,
        remote_path: &str,
    ) -> Result<(), Error> {
        let raw = local_path.as_ref();
        let lossy = raw.to_string_lossy();
        let trimmed = validate_record_path(&lossy)?;
        // Non-UTF-8 paths are read as given.
        let local_path = if raw.to_str().is_some() {
            Path::new(trimmed)
        } else {
            raw
        };
        let contents = tokio::fs::read_to_string(local_path)
            .await
            .map_err(|source| Error::Io {
                path: local_path.to_path_buf(),
                source,
            })?;
        self.upload_record_file_string(&contents, remote_path)
            .await
    }

    /// Store `contents` as the record file at `remote_path`, creating
    /// intermediate directories server-side.
    ///
    /// `POST recordings/{remote_path}` (`text/plain`)
    pub async fn upload_record_file_string(
        &self,
        contents: &str,
        remote_path: &str,
    ) -> Result<(), Error> {
        let remote_path = validate_record_path(remote_path)?;
        debug!(remote_path, bytes = contents.len(), "uploading record file");
        self.transport()
            .fetch_empty(
                Method::POST,
                &Self::path(&format!("recordings/{remote_path}")),
                contents,
                Some(text_plain()),
                StatusCode::NO_CONTENT,
            )
            .await
    }

    /// `DELETE recordings/{remote_path}`
    pub async fn delete_record_file(&self, remote_path: &str) -> Result<(), Error> {
        let remote_path = validate_record_path(remote_path)?;
        debug!(remote_path, "deleting record file");
        self.transport()
            .fetch_empty(
                Method::DELETE,
                &Self::path(&format!("recordings/{remote_path}")),
                "",
                Some(text_plain()),
                StatusCode::NO_CONTENT,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_required_after_trimming() {
        assert!(matches!(
            validate_record_path("  lab/public.snmprec \n"),
            Ok("lab/public.snmprec")
        ));
        assert!(matches!(
            validate_record_path("lab/public.txt"),
            Err(Error::NotRecordFile { .. })
        ));
        assert!(validate_record_path("lab/public.snmprec/").is_err());
    }
}
