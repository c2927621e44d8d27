//! CLI defaults loaded from an optional `nts-seq.toml`, in the style
//! `core-config` loads `oxidized.toml`: look for the file, parse what's
//! there, tolerate what isn't there (missing file or missing keys both mean
//! "use the built-in default"), and never fail the whole run over a
//! malformed optional file — a bad config is reported and discarded rather
//! than aborting.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Parsed `nts-seq.toml` contents, giving the CLI non-default POR/`main`
/// settings without requiring a flag on every invocation.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct CliDefaults {
    #[serde(default)]
    pub sequentialize: SequentializeDefaults,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SequentializeDefaults {
    /// Mirrors `--no-por`: `true` disables partial-order reduction.
    #[serde(default)]
    pub no_por: bool,
    /// Mirrors `--threads`.
    #[serde(default)]
    pub threads: Option<u32>,
    /// The name of the main thread template passed to the task decomposer;
    /// defaults to `"main"` when absent, matching
    /// `Tasks::compute_tasks(n, "main")` in the original.
    #[serde(default = "SequentializeDefaults::default_main_name")]
    pub main_name: String,
}

impl SequentializeDefaults {
    fn default_main_name() -> String {
        "main".to_string()
    }
}

/// Looks for `nts-seq.toml` in the current working directory; this is the
/// only discovery rule this crate implements (no XDG/AppData search), since
/// unlike an interactive editor this is a batch CLI invoked from wherever
/// the build or CI job happens to run.
pub fn discover() -> PathBuf {
    PathBuf::from("nts-seq.toml")
}

/// Loads `CliDefaults` from `path`, if it exists. A missing file yields the
/// all-defaults value; a present-but-malformed file logs a warning and also
/// yields defaults, rather than failing the run over an optional file.
pub fn load_from(path: &Path) -> CliDefaults {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return CliDefaults::default();
    };
    match toml::from_str(&raw) {
        Ok(defaults) => defaults,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config file");
            CliDefaults::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let defaults = load_from(Path::new("/nonexistent/nts-seq.toml"));
        assert_eq!(defaults.sequentialize.main_name, "main");
        assert!(!defaults.sequentialize.no_por);
    }

    #[test]
    fn parses_a_present_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nts-seq.toml");
        std::fs::write(
            &path,
            "[sequentialize]\nno_por = true\nmain_name = \"worker_main\"\n",
        )
        .expect("write fixture");
        let defaults = load_from(&path);
        assert!(defaults.sequentialize.no_por);
        assert_eq!(defaults.sequentialize.main_name, "worker_main");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nts-seq.toml");
        std::fs::write(&path, "not valid toml {{{").expect("write fixture");
        let defaults = load_from(&path);
        assert_eq!(defaults, CliDefaults::default());
    }
}
