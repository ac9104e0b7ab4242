//! Fixtures shared by unit tests: synthetic repositories and shell scripts.

use crate::config::RegenConfig;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable script, creating parent directories.
pub fn write_script(path: &Path, body: &str) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

/// Config rooted at `root` that runs `.py` and `.sh` files with `sh`.
pub fn sh_config(root: &Path) -> RegenConfig {
    let mut config = RegenConfig::default();
    config.paths.root = root.to_path_buf();
    config.interpreters.python = "sh".to_string();
    config.interpreters.shell = "sh".to_string();
    config
}

/// Create `benchmarks/<rule>` with a submodule marker.
pub fn make_benchmark(root: &Path, rule: &str) -> PathBuf {
    let dir = root.join("benchmarks").join(rule);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(".git"), format!("gitdir: ../../.git/modules/{rule}\n")).unwrap();
    dir
}

/// Add a run-aggregation toolchain whose aggregator concatenates every run.
pub fn add_run_toolchain(benchmark: &Path, language: &str) -> PathBuf {
    let dir = benchmark.join(language);
    write_script(
        &dir.join("run_all.sh"),
        "echo \"$(basename \"$(pwd -P)\") ok\" > \"$1/result.txt\"\n",
    );
    write_script(
        &dir.join("generate_results.py"),
        "# usage: generate_results.py --input-dir DIR --output PATH\n\
         input=\"$2\"\n\
         output=\"$4\"\n\
         {\n\
           echo '# Results'\n\
           for run in \"$input\"/run_*; do cat \"$run/result.txt\"; done\n\
         } > \"$output\"\n",
    );
    dir
}
