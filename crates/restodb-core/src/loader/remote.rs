// crates/restodb-core/src/loader/remote.rs
#![cfg(feature = "remote")]

use super::LoadOptions;
use crate::error::{RestoError, Result};
use std::io::Read;

/// Blocking GET of a remote dataset. Non-success statuses are fetch failures.
pub(super) fn fetch(url: &str, opts: &LoadOptions) -> Result<Box<dyn Read>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(opts.timeout)
        .user_agent(opts.user_agent.as_str())
        .build()?;

    tracing::info!(%url, timeout = ?opts.timeout, "fetching dataset");
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(RestoError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(Box::new(response))
}
