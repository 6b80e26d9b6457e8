//! `$PWD` placeholder handling
//!
//! The template is treated as plain text: every literal `$PWD` is replaced,
//! nothing else is interpreted. There is no escape syntax for the token.

/// The only placeholder recognized in templates
pub const PWD_PLACEHOLDER: &str = "$PWD";

/// How the working directory is written into the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Encode the path as JSON string contents (`"` and `\` escaped)
    #[default]
    Escaped,
    /// Insert the path verbatim
    Raw,
}

impl SubstitutionMode {
    /// Text that replaces each placeholder for `value`
    pub fn replacement(&self, value: &str) -> String {
        match self {
            Self::Raw => value.to_string(),
            Self::Escaped => escape_json_str(value),
        }
    }
}

/// Result of a substitution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text with every placeholder replaced
    pub content: String,
    /// Number of placeholders that were replaced
    pub replacements: usize,
}

/// Count the placeholders in `content`
pub fn count_placeholders(content: &str) -> usize {
    content.matches(PWD_PLACEHOLDER).count()
}

/// Replace every `$PWD` in `content` with `value`
pub fn substitute(content: &str, value: &str, mode: SubstitutionMode) -> Substitution {
    let replacements = count_placeholders(content);
    if replacements == 0 {
        return Substitution {
            content: content.to_string(),
            replacements,
        };
    }

    Substitution {
        content: content.replace(PWD_PLACEHOLDER, &mode.replacement(value)),
        replacements,
    }
}

/// JSON-encode `value` and strip the surrounding quotes
fn escape_json_str(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
