//! @ai:module:intent Execute a toolchain runner N times into a fresh scratch area
//! @ai:module:layer application
//! @ai:module:public_api RunExecutor, RunSet
//! @ai:module:stateless false

use crate::config::{InterpreterConfig, PathConfig, RegenConfig};
use crate::error::Result;
use crate::runner::command::Invocation;
use std::path::{Path, PathBuf};

/// @ai:intent Directories holding the raw output of each run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSet {
    pub scratch: PathBuf,
    pub runs: Vec<PathBuf>,
}

/// @ai:intent Runs benchmark runners sequentially
pub struct RunExecutor {
    paths: PathConfig,
    interpreters: InterpreterConfig,
}

impl RunExecutor {
    /// @ai:intent Create an executor from config
    /// @ai:effects pure
    pub fn new(config: &RegenConfig) -> Self {
        Self {
            paths: config.paths.clone(),
            interpreters: config.interpreters.clone(),
        }
    }

    /// @ai:intent Delete and recreate the scratch area of a rule/language pair
    /// @ai:post the returned directory exists and is empty
    /// @ai:effects fs:write
    pub fn reset_scratch(&self, rule: &str, language: &str) -> Result<PathBuf> {
        let scratch = self.paths.scratch_dir(rule, language);
        if scratch.exists() {
            std::fs::remove_dir_all(&scratch)?;
        }
        std::fs::create_dir_all(&scratch)?;
        Ok(scratch)
    }

    /// @ai:intent Run the runner `runs` times, one output directory per iteration
    /// @ai:pre runs >= 1
    /// @ai:post on success the scratch area holds exactly run_1..run_N
    /// @ai:effects fs:write, process
    pub fn execute(
        &self,
        rule: &str,
        language: &str,
        runner: &Path,
        runs: u32,
        working_dir: &Path,
    ) -> Result<RunSet> {
        let scratch = self.reset_scratch(rule, language)?;
        tracing::info!("Running {}/{} x{}...", rule, language, runs);

        let mut run_dirs = Vec::with_capacity(runs as usize);
        for i in 1..=runs {
            let run_dir = scratch.join(format!("run_{i}"));
            std::fs::create_dir(&run_dir)?;

            tracing::info!("  Iteration {}/{}", i, runs);
            Invocation::for_runner(runner, &self.interpreters)
                .arg(&run_dir)
                .current_dir(working_dir)
                .run()?;

            run_dirs.push(run_dir);
        }

        Ok(RunSet {
            scratch,
            runs: run_dirs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegenError;
    use crate::testutil::{sh_config, write_script};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_three_runs_produce_three_directories() {
        let temp = TempDir::new().unwrap();
        let lang_dir = temp.path().join("benchmarks/TDD/go");
        let runner = write_script(
            &lang_dir.join("run_all.sh"),
            "basename \"$(pwd -P)\" > \"$1/cwd.txt\"\necho ran > \"$1/out.txt\"\n",
        );
        let executor = RunExecutor::new(&sh_config(temp.path()));

        let set = executor.execute("TDD", "go", &runner, 3, &lang_dir).unwrap();

        assert_eq!(set.scratch, temp.path().join(".runs/TDD/go"));
        assert_eq!(
            set.runs,
            vec![
                set.scratch.join("run_1"),
                set.scratch.join("run_2"),
                set.scratch.join("run_3"),
            ]
        );
        for run in &set.runs {
            assert_eq!(std::fs::read_to_string(run.join("cwd.txt")).unwrap(), "go\n");
        }
        assert_eq!(std::fs::read_dir(&set.scratch).unwrap().count(), 3);
    }

    #[test]
    fn test_previous_scratch_area_is_discarded() {
        let temp = TempDir::new().unwrap();
        let lang_dir = temp.path().join("benchmarks/TDD/go");
        let runner = write_script(&lang_dir.join("run_all.sh"), "touch \"$1/fresh\"\n");
        let config = sh_config(temp.path());

        let stale = config.paths.scratch_dir("TDD", "go").join("run_7");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("old.txt"), "stale").unwrap();

        let set = RunExecutor::new(&config)
            .execute("TDD", "go", &runner, 1, &lang_dir)
            .unwrap();

        assert!(!stale.exists());
        assert!(set.runs[0].join("fresh").exists());
    }

    #[test]
    fn test_failing_runner_aborts_remaining_iterations() {
        let temp = TempDir::new().unwrap();
        let lang_dir = temp.path().join("benchmarks/TDD/go");
        let runner = write_script(
            &lang_dir.join("run_all.sh"),
            "case \"$1\" in *run_2) echo boom >&2; exit 4;; esac\n",
        );
        let executor = RunExecutor::new(&sh_config(temp.path()));

        let err = executor.execute("TDD", "go", &runner, 3, &lang_dir).unwrap_err();

        match err {
            RegenError::CommandFailed { code, diagnostics, .. } => {
                assert_eq!(code, Some(4));
                assert_eq!(diagnostics, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!temp.path().join(".runs/TDD/go/run_3").exists());
    }

    #[test]
    fn test_unsuffixed_runner_without_exec_bit_runs_through_shell() {
        let temp = TempDir::new().unwrap();
        let lang_dir = temp.path().join("benchmarks/TDD/go");
        std::fs::create_dir_all(&lang_dir).unwrap();
        let runner = lang_dir.join("run_all");
        std::fs::write(&runner, "echo plain > \"$1/out.txt\"\n").unwrap();

        let set = RunExecutor::new(&sh_config(temp.path()))
            .execute("TDD", "go", &runner, 1, &lang_dir)
            .unwrap();

        assert_eq!(std::fs::read_to_string(set.runs[0].join("out.txt")).unwrap(), "plain\n");
    }
}
