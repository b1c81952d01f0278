use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::selection::download_record;
use crate::foundation::error::PfpResult;
use crate::render::compose::{Compositor, EncodedImage};
use crate::session::state::{Action, CustomizerState};
use crate::store::docs::DownloadLog;
use crate::store::host::ImageHost;

/// What an export produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Path of the written PNG.
    pub path: PathBuf,
    /// Public URL when the upload succeeded.
    pub share_url: Option<String>,
    /// Upload failure message; the local file exists regardless.
    pub upload_error: Option<String>,
    /// Whether the download record was stored.
    pub recorded: bool,
}

/// Runs the export pipeline against a session.
///
/// Composition failure aborts before anything is written. Upload and record failures are
/// absorbed into the outcome.
pub struct Exporter<'a> {
    compositor: Compositor<'a>,
    host: Option<&'a dyn ImageHost>,
    log: Option<&'a dyn DownloadLog>,
    out_path: PathBuf,
}

impl<'a> Exporter<'a> {
    /// Exporter writing to `out_path`, without upload or analytics.
    pub fn new(compositor: Compositor<'a>, out_path: impl Into<PathBuf>) -> Self {
        Self {
            compositor,
            host: None,
            log: None,
            out_path: out_path.into(),
        }
    }

    /// Upload exports to `host`.
    pub fn with_host(mut self, host: &'a dyn ImageHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Record exports in `log`.
    pub fn with_log(mut self, log: &'a dyn DownloadLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Compose the current selection, write it, upload it and record it.
    #[tracing::instrument(skip_all, fields(out = %self.out_path.display()))]
    pub fn export(&self, state: &mut CustomizerState) -> PfpResult<ExportOutcome> {
        state.apply(Action::ExportStarted)?;
        let result = self.run(state);
        let (share_url, upload_failed) = match &result {
            Ok(outcome) => (outcome.share_url.clone(), outcome.upload_error.is_some()),
            Err(_) => (None, false),
        };
        state.apply(Action::ExportFinished {
            share_url,
            upload_failed,
        })?;
        result
    }

    fn run(&self, state: &CustomizerState) -> PfpResult<ExportOutcome> {
        let image = self
            .compositor
            .compose(state.selection(), state.fallback_color())?;
        write_download(&self.out_path, &image)?;
        tracing::info!(bytes = image.png.len(), "export written");

        let mut share_url = None;
        let mut upload_error = None;
        if let Some(host) = self.host {
            match host.upload(&image) {
                Ok(url) => {
                    tracing::info!(%url, "export uploaded");
                    share_url = Some(url);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "upload failed; local file kept");
                    upload_error = Some(e.to_string());
                }
            }
        }

        let mut recorded = false;
        if let Some(log) = self.log {
            match log.append(&download_record(state.selection())) {
                Ok(()) => recorded = true,
                Err(e) => tracing::warn!(error = %e, "download record not stored"),
            }
        }

        Ok(ExportOutcome {
            path: self.out_path.clone(),
            share_url,
            upload_error,
            recorded,
        })
    }
}

fn write_download(path: &Path, image: &EncodedImage) -> PfpResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &image.png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
