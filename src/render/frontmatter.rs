/// Builder for the YAML frontmatter block at the top of agent files.
///
/// Lines are emitted in insertion order and values are written raw, so glob
/// patterns like `**/*.ts` stay unquoted the way every agent expects
/// (`serde_yaml` would wrap them in quotes). Free-text values go through
/// [`Frontmatter::text_field`], which escapes via YAML serialization.
#[derive(Debug, Default)]
pub struct Frontmatter {
    lines: Vec<String>,
}

impl Frontmatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value, written as-is (globs, booleans already formatted, ...)
    #[must_use]
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("{key}: {value}"));
        self
    }

    /// Free-text value, YAML-escaped when it needs quoting
    #[must_use]
    pub fn text_field(self, key: &str, value: &str) -> Self {
        self.field(key, &yaml_scalar(value))
    }

    #[must_use]
    pub fn flag(self, key: &str, value: bool) -> Self {
        let rendered = if value { "true" } else { "false" };
        self.field(key, rendered)
    }

    #[must_use]
    pub fn render(self) -> String {
        let mut out = String::from("---\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("---\n");
        out
    }
}

/// Serialize a string as a YAML scalar, quoting only when required
#[must_use]
pub fn yaml_scalar(value: &str) -> String {
    serde_yaml::to_string(value)
        .unwrap_or_else(|_| value.to_string())
        .trim_end()
        .to_string()
}
