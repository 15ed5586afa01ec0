use crate::model::StandardVersion;

/// Repo-root-relative path of the canonical standard file
#[must_use]
pub fn canonical_standard_path(slug: &str) -> String {
    format!(".packmind/standards/{slug}.md")
}

/// `../` chain climbing back to the target root from a file nested
/// `depth` directories below it.
///
/// Agent files live at varying depths (`.junie/` is one level,
/// `.claude/rules/packmind/` is three); links to the canonical
/// `.packmind/` files must be computed from that depth, never hard-coded.
#[must_use]
pub fn relative_root_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

/// Render the rule body shared by every standard-capable agent:
/// summary header, one bullet per rule, link back to the canonical file.
#[must_use]
pub fn render_standard_rules(standard: &StandardVersion, nesting_depth: usize) -> String {
    let mut body = format!("{} :\n", standard.display_summary());
    for rule in &standard.rules {
        body.push_str(&format!("- {}\n", rule.content));
    }
    let prefix = relative_root_prefix(nesting_depth);
    let canonical = canonical_standard_path(&standard.slug);
    body.push_str(&format!(
        "\nFull standard: [{}]({prefix}{canonical})\n",
        standard.name
    ));
    body
}

/// Render the canonical `.packmind/standards/{slug}.md` file content
#[must_use]
pub fn render_standard_file(standard: &StandardVersion) -> String {
    let mut content = format!("# {}\n\n{}\n", standard.name, standard.description.trim_end());
    if !standard.rules.is_empty() {
        content.push_str("\n## Rules\n\n");
        for rule in &standard.rules {
            content.push_str(&format!("- {}\n", rule.content));
        }
    }
    if let Some(scope) = standard.scope.as_deref() {
        if !scope.is_empty() {
            content.push_str(&format!("\nScope: `{scope}`\n"));
        }
    }
    content
}

/// Render the list of links to canonical standard files, one bullet each
#[must_use]
pub fn render_standard_link_list(standards: &[StandardVersion], nesting_depth: usize) -> String {
    let prefix = relative_root_prefix(nesting_depth);
    let mut list = String::new();
    for standard in standards {
        let canonical = canonical_standard_path(&standard.slug);
        list.push_str(&format!(
            "- [{}]({prefix}{canonical}): {}\n",
            standard.name,
            standard.display_summary()
        ));
    }
    list
}

/// Render the body of a standards index listing every deployed standard
#[must_use]
pub fn render_standards_index_body(
    standards: &[StandardVersion],
    nesting_depth: usize,
    app_web_url: &str,
) -> String {
    let mut body = format!(
        "# Packmind standards\n\nManaged by [Packmind]({app_web_url}). Apply these standards to all code you write.\n\n"
    );
    if standards.is_empty() {
        body.push_str("No standards available.\n");
        return body;
    }
    body.push_str(&render_standard_link_list(standards, nesting_depth));
    body
}
