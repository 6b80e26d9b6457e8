//! Settings generation
//!
//! Reads the template, resolves `$PWD`, checks that the result is JSON and
//! writes it out. Nothing touches the output location until the rendered
//! text has validated, so a failed run leaves no file and no directory behind.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::InitConfig;
use crate::error::InitError;
use crate::placeholder::{self, SubstitutionMode};

/// Template text after substitution and validation
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Substituted text, exactly as it will be written
    pub content: String,
    /// Number of `$PWD` occurrences replaced
    pub replacements: usize,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct InitOutcome {
    /// Where the settings were (or would be) written
    pub output: PathBuf,
    /// Value substituted for `$PWD`
    pub working_dir: String,
    /// Number of `$PWD` occurrences replaced
    pub replacements: usize,
    /// False for dry runs
    pub written: bool,
    /// Rendered settings, only kept for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Substitute and validate template text in memory
pub fn render(
    template: &str,
    working_dir: &str,
    mode: SubstitutionMode,
) -> Result<Rendered, InitError> {
    let substitution = placeholder::substitute(template, working_dir, mode);
    debug!(replacements = substitution.replacements, ?mode, "substituted placeholders");

    serde_json::from_str::<serde_json::Value>(&substitution.content)
        .map_err(|source| InitError::InvalidJson { source })?;

    Ok(Rendered {
        content: substitution.content,
        replacements: substitution.replacements,
    })
}

/// Generate the settings file described by `config`
pub fn run(config: &InitConfig) -> Result<InitOutcome, InitError> {
    debug!(template = %config.template.display(), "reading template");
    let template = fs::read_to_string(&config.template)
        .map_err(|e| InitError::reading_template(config.template.clone(), e))?;

    let working_dir = config.working_dir_str();
    let rendered = render(&template, &working_dir, config.mode)?;

    if config.dry_run {
        info!(output = %config.output.display(), "dry run, nothing written");
        return Ok(InitOutcome {
            output: config.output.clone(),
            working_dir,
            replacements: rendered.replacements,
            written: false,
            content: Some(rendered.content),
        });
    }

    write_output(&config.output, &rendered.content)?;
    info!(output = %config.output.display(), "settings written");

    Ok(InitOutcome {
        output: config.output.clone(),
        working_dir,
        replacements: rendered.replacements,
        written: true,
        content: None,
    })
}

/// Write `content` to `path`, creating the parent directory first
fn write_output(path: &Path, content: &str) -> Result<(), InitError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent).map_err(|e| InitError::io(parent, e))?;
        }
    }

    fs::write(path, content).map_err(|e| InitError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE};
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"{
  "hooks": {
    "PreToolUse": [
      {
        "matcher": "Read",
        "hooks": [
          { "type": "command", "command": "$PWD/.claude/hooks/read-hook.sh" }
        ]
      }
    ]
  },
  "env": { "PROJECT_ROOT": "$PWD" }
}
"#;

    fn project_with_template(content: &str) -> (TempDir, InitConfig) {
        let temp = TempDir::new().unwrap();
        let config = InitConfig::new(temp.path());
        fs::create_dir_all(config.template.parent().unwrap()).unwrap();
        fs::write(&config.template, content).unwrap();
        (temp, config)
    }

    #[test]
    fn test_run_replaces_every_placeholder() {
        let (_temp, config) = project_with_template(TEMPLATE);

        let outcome = run(&config).unwrap();
        let written = fs::read_to_string(&config.output).unwrap();
        let dir = config.working_dir_str();

        assert!(outcome.written);
        assert_eq!(outcome.replacements, 2);
        assert_eq!(outcome.output, config.output);
        assert_eq!(written.matches(dir.as_str()).count(), 2);
        assert!(!written.contains("$PWD"));

        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["env"]["PROJECT_ROOT"], dir);
    }

    #[test]
    fn test_run_preserves_formatting() {
        let (_temp, config) = project_with_template(TEMPLATE);
        run(&config).unwrap();

        let written = fs::read_to_string(&config.output).unwrap();
        assert_eq!(written, TEMPLATE.replace("$PWD", &config.working_dir_str()));
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = InitConfig::new(temp.path());

        let err = run(&config).unwrap_err();

        assert!(matches!(err, InitError::TemplateNotFound { ref path } if path == &config.template));
        assert!(!config.output.exists());
        assert!(!temp.path().join(".claude").exists());
    }

    #[test]
    fn test_invalid_json_writes_nothing() {
        let (_temp, config) = project_with_template(r#"{"command": "$PWD/x.sh",}"#);

        let err = run(&config).unwrap_err();

        assert!(matches!(err, InitError::InvalidJson { .. }));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_invalid_json_leaves_output_dir_absent() {
        let (temp, config) = project_with_template("not json $PWD");
        let config = config.with_output(temp.path().join("generated/settings.json"));

        assert!(run(&config).is_err());
        assert!(!temp.path().join("generated").exists());
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let (temp, config) = project_with_template(TEMPLATE);
        let config = config.with_output("nested/deeper/settings.local.json");

        run(&config).unwrap();

        assert!(temp.path().join("nested/deeper").is_dir());
        assert!(config.output.is_file());
    }

    #[test]
    fn test_run_is_idempotent() {
        let (_temp, config) = project_with_template(TEMPLATE);

        run(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_overwrites_previous_output() {
        let (_temp, config) = project_with_template(TEMPLATE);
        fs::write(&config.output, "stale").unwrap();

        run(&config).unwrap();

        let written = fs::read_to_string(&config.output).unwrap();
        assert_ne!(written, "stale");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("settings.example.json");
        fs::write(&template, TEMPLATE).unwrap();
        let config = InitConfig::new(temp.path())
            .with_template(&template)
            .with_dry_run(true);

        let outcome = run(&config).unwrap();

        assert!(!outcome.written);
        assert_eq!(outcome.replacements, 2);
        assert!(outcome.content.unwrap().contains(&config.working_dir_str()));
        assert!(!temp.path().join(DEFAULT_OUTPUT).exists());
        assert!(!temp.path().join(".claude").exists());
    }

    #[test]
    fn test_raw_mode_can_break_json() {
        let project = TempDir::new().unwrap();
        let root = project.path().join(r#"odd"dir"#);
        fs::create_dir_all(root.join(".claude")).unwrap();
        fs::write(root.join(DEFAULT_TEMPLATE), TEMPLATE).unwrap();

        let escaped = InitConfig::new(&root);
        run(&escaped).unwrap();
        let written = fs::read_to_string(&escaped.output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["env"]["PROJECT_ROOT"], escaped.working_dir_str());

        fs::remove_file(&escaped.output).unwrap();
        let raw = InitConfig::new(&root).with_mode(SubstitutionMode::Raw);
        assert!(matches!(run(&raw), Err(InitError::InvalidJson { .. })));
        assert!(!raw.output.exists());
    }

    #[test]
    fn test_render_counts_replacements() {
        let rendered = render(r#"["$PWD", "$PWD", "$PWD"]"#, "/p", SubstitutionMode::Escaped).unwrap();

        assert_eq!(rendered.replacements, 3);
        assert_eq!(rendered.content, r#"["/p", "/p", "/p"]"#);
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = InitOutcome {
            output: PathBuf::from("/p/.claude/settings.local.json"),
            working_dir: "/p".to_string(),
            replacements: 1,
            written: true,
            content: None,
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["output"], "/p/.claude/settings.local.json");
        assert_eq!(value["replacements"], 1);
        assert!(value.get("content").is_none());
    }
}
