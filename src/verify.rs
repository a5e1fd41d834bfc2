//! Build verification guard.
//!
//! Build tools regularly exit zero after producing nothing usable. Before the
//! output directory is pushed into a branch whose history gets rewritten, it
//! must contain an entry page and at least one script bundle under its assets
//! directory.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::BuildConfig;

/// Why a build output directory was rejected.
///
/// Paths are reported relative to the working directory, as configured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("{dir}/ missing")]
    MissingOutputDir { dir: String },

    #[error("{path} missing")]
    MissingEntry { path: String },

    #[error("{path} missing")]
    MissingAssets { path: String },

    #[error("no .{extension} bundle found in {path}")]
    NoBundle { extension: String, path: String },
}

fn join(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

/// Check the output directory under `workdir`, stopping at the first failure.
///
/// Checks in order: output directory, entry page, assets directory, and a
/// file in the assets directory with the bundle extension.
pub fn verify_build(workdir: &Path, build: &BuildConfig) -> Result<(), VerifyError> {
    let output = workdir.join(&build.output_dir);
    let output_name = build.output_dir.trim_end_matches('/');

    if !output.is_dir() {
        return Err(VerifyError::MissingOutputDir {
            dir: output_name.to_string(),
        });
    }

    if !output.join(&build.entry).is_file() {
        return Err(VerifyError::MissingEntry {
            path: join(output_name, &build.entry),
        });
    }

    let assets = output.join(&build.assets_dir);
    let assets_name = join(output_name, &build.assets_dir);
    if !assets.is_dir() {
        return Err(VerifyError::MissingAssets { path: assets_name });
    }

    if !has_bundle(&assets, &build.bundle_extension) {
        return Err(VerifyError::NoBundle {
            extension: build.bundle_extension.trim_start_matches('.').to_string(),
            path: assets_name,
        });
    }

    log::debug!("verified {}", output.display());
    Ok(())
}

/// Whether `dir` directly contains a file ending in `.<extension>`.
fn has_bundle(dir: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.path().is_file() && entry.file_name().to_string_lossy().ends_with(&suffix)
    })
}
