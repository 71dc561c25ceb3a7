//! Orchestrator for converting files.

use crate::cli::Args;
use crate::config::Config;
use crate::output::OutputFormatter;
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use wxml_transform::{convert_file, ConvertError};

/// Result of a conversion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Number of files found.
    pub file_count: usize,
    /// Number of files converted and written.
    pub converted: usize,
    /// Number of files that failed.
    pub failed: usize,
    /// Time taken.
    pub duration_ms: u64,
}

/// Conversion result for one file.
struct FileOutcome {
    path: PathBuf,
    result: Result<String, ConvertError>,
}

/// Orchestrator for running vue2wxml.
pub struct Orchestrator {
    /// Configuration.
    config: Config,
    /// CLI arguments.
    args: Args,
    /// Output formatter.
    formatter: OutputFormatter,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(workspace: PathBuf, args: Args) -> Result<Self> {
        let config = Config::load(&workspace, &args)?;
        if let Some(path) = &config.config_path {
            debug!(path = %path.display(), "loaded config file");
        }
        let formatter = OutputFormatter::new(args.output, args.verbose);

        Ok(Self {
            config,
            args,
            formatter,
        })
    }

    /// Convert every file under the input paths once.
    pub fn run_once(&self) -> Result<RunResult> {
        let files = self.find_vue_files()?;
        info!(count = files.len(), "found files to convert");
        Ok(self.run_files(&files))
    }

    /// Run in watch mode.
    pub fn run_watch_mode(&self) -> Result<()> {
        use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::{channel, RecvTimeoutError};
        use std::time::Duration;

        eprintln!("Starting watch mode...\n");

        // Initial run
        self.run_once()?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
        )
        .into_diagnostic()?;

        for root in self.roots() {
            let mode = if root.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher.watch(&root, mode).into_diagnostic()?;
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    let mut changed: Vec<PathBuf> = event
                        .paths
                        .into_iter()
                        .filter(|p| p.is_file() && self.config.should_process(p))
                        .collect();
                    changed.dedup();
                    if changed.is_empty() {
                        continue;
                    }

                    if !self.args.preserve_watch_output {
                        // Clear screen
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    eprintln!("File change detected. Reconverting...\n");
                    self.run_files(&changed);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    /// Convert the given files in parallel and report the results.
    fn run_files(&self, files: &[PathBuf]) -> RunResult {
        let start = Instant::now();

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|path| FileOutcome {
                path: path.clone(),
                result: convert_file(path, &self.config.convert_options),
            })
            .collect();

        let mut result = RunResult {
            file_count: files.len(),
            ..Default::default()
        };
        for outcome in &outcomes {
            if self.report(outcome, files.len() > 1) {
                result.converted += 1;
            } else {
                result.failed += 1;
            }
        }
        result.duration_ms = start.elapsed().as_millis() as u64;

        if self.args.timings {
            eprintln!("\nTiming: {}ms", result.duration_ms);
        }
        self.formatter.print_summary(&result);
        result
    }

    /// Write or print one outcome. Returns whether it succeeded.
    fn report(&self, outcome: &FileOutcome, many: bool) -> bool {
        let markup = match &outcome.result {
            Ok(markup) => markup,
            Err(error) => {
                let source = std::fs::read_to_string(&outcome.path).ok();
                self.formatter
                    .print_failure(&outcome.path, error, source.as_deref());
                return false;
            }
        };

        if self.args.stdout {
            if many {
                println!("<!-- {} -->", outcome.path.display());
            }
            println!("{}", markup);
            self.formatter.print_converted(&outcome.path, None);
            return true;
        }

        let target = self.output_path(&outcome.path);
        match write_output(&target, markup) {
            Ok(()) => {
                debug!(file = %outcome.path.display(), output = %target.display(), "wrote");
                self.formatter.print_converted(&outcome.path, Some(&target));
                true
            }
            Err(e) => {
                self.formatter.print_write_error(&target, &e);
                false
            }
        }
    }

    /// Input roots: the paths given on the command line, or the workspace.
    fn roots(&self) -> Vec<PathBuf> {
        if self.args.paths.is_empty() {
            vec![self.config.workspace.clone()]
        } else {
            self.args
                .paths
                .iter()
                .map(|p| self.config.workspace.join(p))
                .collect()
        }
    }

    /// Find all files to convert.
    fn find_vue_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for root in self.roots() {
            if root.is_file() {
                // Explicit files skip the ignore globs
                if self.config.has_extension(&root) {
                    files.push(root);
                }
                continue;
            }
            if !root.exists() {
                return Err(miette::miette!("Path not found: {}", root.display()));
            }

            for entry in walkdir::WalkDir::new(&root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if entry.file_type().is_dir() || !self.config.should_process(path) {
                    continue;
                }
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Where the converted markup for `source` is written.
    fn output_path(&self, source: &Path) -> PathBuf {
        let file_name = Path::new(source.file_name().unwrap_or_default()).with_extension("wxml");
        match &self.config.out_dir {
            Some(dir) => {
                let relative = source
                    .strip_prefix(&self.config.workspace)
                    .ok()
                    .and_then(Path::parent)
                    .unwrap_or_else(|| Path::new(""));
                dir.join(relative).join(file_name)
            }
            None => source.with_extension("wxml"),
        }
    }
}

fn write_output(path: &Path, markup: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const PAGE: &str = "<template>\n  <div class=\"page\"><span>{{ title }}</span></div>\n</template>\n";

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/pages")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/lib")).unwrap();
        fs::write(dir.path().join("src/pages/index.vue"), PAGE).unwrap();
        fs::write(dir.path().join("src/pages/index.js"), "export default {}").unwrap();
        fs::write(dir.path().join("node_modules/lib/x.vue"), PAGE).unwrap();
        dir
    }

    fn orchestrator(dir: &Path, args: Args) -> Orchestrator {
        let args = Args {
            output: crate::cli::OutputFormat::Machine,
            ..args
        };
        Orchestrator::new(dir.to_path_buf(), args).unwrap()
    }

    #[test]
    fn test_find_files_skips_ignored() {
        let dir = workspace();
        let files = orchestrator(dir.path(), Args::default())
            .find_vue_files()
            .unwrap();
        assert_eq!(files, vec![dir.path().join("src/pages/index.vue")]);
    }

    #[test]
    fn test_writes_next_to_source() {
        let dir = workspace();
        let result = orchestrator(dir.path(), Args::default()).run_once().unwrap();

        assert_eq!(result.converted, 1);
        assert_eq!(result.failed, 0);
        let written = fs::read_to_string(dir.path().join("src/pages/index.wxml")).unwrap();
        assert_eq!(
            written,
            "<view class=\"page\">\n  <text>{{ title }}</text>\n</view>"
        );
    }

    #[test]
    fn test_out_dir_mirrors_workspace_layout() {
        let dir = workspace();
        let out = dir.path().join("dist");
        let args = Args {
            out_dir: Some(out.clone()),
            ..Default::default()
        };
        let orchestrator = orchestrator(dir.path(), args);

        assert_eq!(
            orchestrator.output_path(&dir.path().join("src/pages/index.vue")),
            out.join("src/pages/index.wxml")
        );
        orchestrator.run_once().unwrap();
        assert!(out.join("src/pages/index.wxml").is_file());
    }

    #[test]
    fn test_failures_are_counted_per_file() {
        let dir = workspace();
        fs::write(
            dir.path().join("src/pages/bad.vue"),
            "<template><my-widget /></template>",
        )
        .unwrap();

        let result = orchestrator(dir.path(), Args::default()).run_once().unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.converted, 1);
        assert_eq!(result.failed, 1);
        assert!(!dir.path().join("src/pages/bad.wxml").exists());
    }

    #[test]
    fn test_explicit_file_argument() {
        let dir = workspace();
        let args = Args {
            paths: vec![PathBuf::from("node_modules/lib/x.vue")],
            stdout: true,
            ..Default::default()
        };
        let result = orchestrator(dir.path(), args).run_once().unwrap();
        assert_eq!(result.converted, 1);
        assert!(!dir.path().join("node_modules/lib/x.wxml").exists());
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = workspace();
        let args = Args {
            paths: vec![PathBuf::from("nope")],
            ..Default::default()
        };
        assert!(orchestrator(dir.path(), args).run_once().is_err());
    }
}
