use std::time::Duration;

use anyhow::Context;

use crate::foundation::error::PfpResult;

pub(crate) fn build_client(timeout_ms: u64) -> PfpResult<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .context("build http client")?;
    Ok(client)
}
