use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

use crate::error::{DeployError, Result};

/// Represents the complete configuration for site-deploy.
///
/// Every field has a default, so an absent or partial `deploy.toml` still
/// describes the fixed workflow: push `main`, build into `dist`, publish to `gh-pages`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_mainline() -> String {
    "main".to_string()
}

fn default_publish_branch() -> String {
    "gh-pages".to_string()
}

/// Branch and remote names used by the pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// The only branch a deployment may run from.
    #[serde(default = "default_mainline")]
    pub mainline: String,

    /// Receives the output directory through a subtree push.
    #[serde(default = "default_publish_branch")]
    pub publish_branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            mainline: default_mainline(),
            publish_branch: default_publish_branch(),
        }
    }
}

fn default_build_command() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "build".to_string()]
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_entry() -> String {
    "index.html".to_string()
}

fn default_fallback() -> String {
    "404.html".to_string()
}

fn default_marker() -> String {
    ".nojekyll".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_bundle_extension() -> String {
    "js".to_string()
}

/// Build command and the shape of the directory it produces.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    /// Program followed by its arguments; never passed through a shell.
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_entry")]
    pub entry: String,

    #[serde(default = "default_fallback")]
    pub fallback: String,

    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    #[serde(default = "default_bundle_extension")]
    pub bundle_extension: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            command: default_build_command(),
            output_dir: default_output_dir(),
            entry: default_entry(),
            fallback: default_fallback(),
            marker: default_marker(),
            assets_dir: default_assets_dir(),
            bundle_extension: default_bundle_extension(),
        }
    }
}

fn default_message() -> String {
    "Update".to_string()
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Used when the commit message prompt is left blank.
    #[serde(default = "default_message")]
    pub default_message: String,

    /// Stream every command's output live, including quiet lookups.
    #[serde(default)]
    pub debug: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            default_message: default_message(),
            debug: false,
        }
    }
}

impl Config {
    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.build.command.is_empty() || self.build.command[0].trim().is_empty() {
            return Err(DeployError::config("build.command must name a program"));
        }

        for (field, value) in [
            ("git.remote", &self.git.remote),
            ("git.mainline", &self.git.mainline),
            ("git.publish_branch", &self.git.publish_branch),
        ] {
            if value.trim().is_empty() {
                return Err(DeployError::config(format!("{} must not be empty", field)));
            }
        }

        if self.git.mainline == self.git.publish_branch {
            return Err(DeployError::config(
                "git.publish_branch must differ from git.mainline",
            ));
        }

        let output = Path::new(&self.build.output_dir);
        if self.build.output_dir.trim().is_empty()
            || output
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(DeployError::config(format!(
                "build.output_dir '{}' must be a relative path inside the repository",
                self.build.output_dir
            )));
        }

        for (field, value) in [
            ("build.entry", &self.build.entry),
            ("build.fallback", &self.build.fallback),
            ("build.marker", &self.build.marker),
            ("build.assets_dir", &self.build.assets_dir),
            ("build.bundle_extension", &self.build.bundle_extension),
        ] {
            if value.trim().is_empty() {
                return Err(DeployError::config(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `deploy.toml` in current directory
/// 3. `.deploy.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The result is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| DeployError::config(format!("Cannot read {}: {}", path, e)))?
    } else if Path::new("./deploy.toml").exists() {
        fs::read_to_string("./deploy.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".deploy.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| DeployError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
