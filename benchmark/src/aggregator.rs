//! @ai:module:intent Invoke results generators to produce RESULTS.md
//! @ai:module:layer application
//! @ai:module:public_api AggregatorInvoker, ResultsSource
//! @ai:module:depends_on runner, config
//! @ai:module:stateless true

use crate::config::{InterpreterConfig, PathConfig, RegenConfig, RESULTS_FILE};
use crate::error::{RegenError, Result};
use crate::runner::command::{Interpreter, Invocation};
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// @ai:intent Where the final results file content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsSource {
    /// The generator wrote the file itself.
    File,
    /// The generator printed the results; they were written verbatim.
    Stdout,
}

/// @ai:intent Runs generators under the run-aggregation or metrics-store protocol
pub struct AggregatorInvoker {
    paths: PathConfig,
    interpreters: InterpreterConfig,
}

impl AggregatorInvoker {
    /// @ai:intent Create an invoker from config
    /// @ai:effects pure
    pub fn new(config: &RegenConfig) -> Self {
        Self {
            paths: config.paths.clone(),
            interpreters: config.interpreters.clone(),
        }
    }

    /// @ai:intent Results path for a rule/language pair, parent directories created
    /// @ai:effects fs:write
    pub fn prepare_results_path(&self, rule: &str, language: &str) -> Result<PathBuf> {
        let path = self.paths.results_path(rule, language);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// @ai:intent Aggregate collected run directories into the results file
    /// @ai:post output exists on success; on failure the previous file is untouched
    /// @ai:effects fs:write, process
    pub fn aggregate_runs(
        &self,
        aggregator: &Path,
        input_dir: &Path,
        output: &Path,
        working_dir: &Path,
    ) -> Result<ResultsSource> {
        tracing::info!(
            "Aggregating {} -> {}",
            input_dir.display(),
            self.display_path(output)
        );

        let staged = staging_path(output);
        remove_if_present(&staged)?;

        Invocation::for_script(aggregator, &self.interpreters)
            .arg("--input-dir")
            .arg(input_dir)
            .arg("--output")
            .arg(&staged)
            .current_dir(working_dir)
            .run()
            .inspect_err(|_| discard(&staged))?;

        if !staged.is_file() {
            return Err(RegenError::MissingOutput {
                generator: aggregator.to_path_buf(),
                expected: output.to_path_buf(),
            });
        }

        std::fs::rename(&staged, output)?;
        Ok(ResultsSource::File)
    }

    /// @ai:intent Generate the results file from the shared metrics store
    /// @ai:post output exists on success, written from stdout when the generator did not create it
    /// @ai:post on failure the previous file is untouched
    /// @ai:effects fs:write, process
    pub fn generate_from_store(
        &self,
        generator: &Path,
        output: &Path,
        working_dir: &Path,
    ) -> Result<ResultsSource> {
        let metrics_dir = self.paths.metrics_store();
        tracing::info!(
            "Generating {} from {}",
            self.display_path(output),
            metrics_dir.display()
        );

        let staged = staging_path(output);
        remove_if_present(&staged)?;

        let mut invocation = Invocation::for_script(generator, &self.interpreters);
        if Interpreter::for_path(generator).is_script() {
            invocation = invocation
                .arg("--metrics-dir")
                .arg(&metrics_dir)
                .arg("--output")
                .arg(&staged);
        }

        let result = invocation
            .env("METRICS_DIR", &metrics_dir)
            .env("OUTPUT_PATH", &staged)
            .env("RESULTS_ROOT", &self.paths.root)
            .current_dir(working_dir)
            .run()
            .inspect_err(|_| discard(&staged))?;

        if staged.is_file() {
            std::fs::rename(&staged, output)?;
            return Ok(ResultsSource::File);
        }

        if result.stdout.trim().is_empty() {
            return Err(RegenError::MissingOutput {
                generator: generator.to_path_buf(),
                expected: output.to_path_buf(),
            });
        }

        std::fs::write(output, result.stdout.as_bytes())?;
        Ok(ResultsSource::Stdout)
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.paths.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// @ai:intent Sibling path a generator writes to before the result replaces `output`
/// @ai:effects pure
fn staging_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(output.file_name().unwrap_or_else(|| OsStr::new(RESULTS_FILE)));
    name.push(".partial");
    output.with_file_name(name)
}

fn remove_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

fn discard(staged: &Path) {
    if let Err(e) = remove_if_present(staged) {
        tracing::warn!("Could not remove {}: {}", staged.display(), e);
    }
}
