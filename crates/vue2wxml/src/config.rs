//! Configuration loading and management.

use crate::cli::Args;
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wxml_transform::{ConvertOptions, FormatOptions, TransformOptions};

/// Name of the config file looked up in the workspace.
pub const CONFIG_FILE_NAME: &str = "vue2wxml.json";

const DEFAULT_IGNORE: &[&str] = &["**/node_modules/**", "**/.git/**"];

/// Contents of `vue2wxml.json`. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    /// File extensions to convert, with the leading dot.
    pub extensions: Vec<String>,
    /// Extra ignore globs.
    pub ignore: Vec<String>,
    /// Output directory, relative to the workspace.
    pub out_dir: Option<PathBuf>,
    /// Keep template comments.
    pub comments: bool,
    /// Beautifier options.
    pub format: FormatOptions,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            extensions: vec![".vue".to_string()],
            ignore: Vec::new(),
            out_dir: None,
            comments: true,
            format: FormatOptions::default(),
        }
    }
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid config file {}", path.display()))
    }
}

/// Configuration for vue2wxml.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace root directory.
    pub workspace: PathBuf,
    /// The config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    /// File extensions to process.
    pub extensions: Vec<String>,
    /// Ignore patterns.
    pub ignore_patterns: Vec<String>,
    ignore_set: GlobSet,
    /// Where converted files go; `None` writes next to the source.
    pub out_dir: Option<PathBuf>,
    pub convert_options: ConvertOptions,
}

impl Config {
    /// Load configuration from CLI arguments and workspace.
    pub fn load(workspace: &Path, args: &Args) -> Result<Self> {
        let config_path = args.config.clone().or_else(|| {
            let candidate = workspace.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        });
        let file = match &config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let mut ignore_patterns: Vec<String> =
            DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect();
        ignore_patterns.extend(file.ignore);
        ignore_patterns.extend(args.ignore.iter().cloned());
        let ignore_set = build_glob_set(&ignore_patterns)?;

        let out_dir = args
            .out_dir
            .clone()
            .or_else(|| file.out_dir.map(|dir| workspace.join(dir)));

        let convert_options = ConvertOptions {
            transform: TransformOptions {
                comments: file.comments && !args.no_comments,
            },
            format: file.format,
        };

        Ok(Self {
            workspace: workspace.to_path_buf(),
            config_path,
            extensions: file.extensions,
            ignore_patterns,
            ignore_set,
            out_dir,
            convert_options,
        })
    }

    /// Check if a file should be processed.
    pub fn should_process(&self, path: &Path) -> bool {
        self.has_extension(path) && !self.ignore_set.is_match(path)
    }

    pub fn has_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        self.extensions.iter().any(|e| e == &ext)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid ignore pattern `{pattern}`"))?;
        builder.add(glob);
    }
    builder.build().into_diagnostic()
}
