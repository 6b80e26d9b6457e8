//! Resolved inputs for one initialization run

use std::path::{Path, PathBuf};

use crate::error::InitError;
use crate::placeholder::SubstitutionMode;

/// Template location, relative to the working directory
pub const DEFAULT_TEMPLATE: &str = ".claude/settings.example.json";

/// Output location, relative to the working directory
pub const DEFAULT_OUTPUT: &str = ".claude/settings.local.json";

/// Environment override for the template path
pub const TEMPLATE_ENV: &str = "READ_HOOK_TEMPLATE";

/// Environment override for the output path
pub const OUTPUT_ENV: &str = "READ_HOOK_OUTPUT";

/// Configuration for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    /// Directory substituted for `$PWD`; relative paths resolve against it
    pub working_dir: PathBuf,
    /// Template to read
    pub template: PathBuf,
    /// File to write
    pub output: PathBuf,
    /// How the working directory is inserted
    pub mode: SubstitutionMode,
    /// Validate only, write nothing
    pub dry_run: bool,
}

impl InitConfig {
    /// Defaults rooted at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Self {
            template: working_dir.join(DEFAULT_TEMPLATE),
            output: working_dir.join(DEFAULT_OUTPUT),
            working_dir,
            mode: SubstitutionMode::default(),
            dry_run: false,
        }
    }

    /// Defaults rooted at the process's current directory
    pub fn from_current_dir() -> Result<Self, InitError> {
        let cwd = std::env::current_dir().map_err(InitError::WorkingDir)?;
        Ok(Self::new(cwd))
    }

    /// Apply `READ_HOOK_TEMPLATE` / `READ_HOOK_OUTPUT` if set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(TEMPLATE_ENV).ok().as_deref(),
            std::env::var(OUTPUT_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, template: Option<&str>, output: Option<&str>) -> Self {
        if let Some(path) = template.filter(|p| !p.trim().is_empty()) {
            self = self.with_template(path);
        }
        if let Some(path) = output.filter(|p| !p.trim().is_empty()) {
            self = self.with_output(path);
        }
        self
    }

    pub fn with_template(mut self, path: impl AsRef<Path>) -> Self {
        self.template = self.resolve(path.as_ref());
        self
    }

    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = self.resolve(path.as_ref());
        self
    }

    pub fn with_mode(mut self, mode: SubstitutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The string written in place of `$PWD`
    pub fn working_dir_str(&self) -> String {
        self.working_dir.to_string_lossy().into_owned()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}
