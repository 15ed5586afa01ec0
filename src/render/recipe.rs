use crate::model::RecipeVersion;
use crate::render::standard::relative_root_prefix;

/// Mandatory banner prepended to every recipes index an agent reads
pub const RECIPES_BANNER: &str =
    "Read the recipes listed below before writing any code. When a recipe matches \
the task at hand, follow its steps instead of improvising.";

/// Repo-root-relative path of the canonical recipe file
#[must_use]
pub fn canonical_recipe_path(slug: &str) -> String {
    format!(".packmind/recipes/{slug}.md")
}

/// Render the canonical `.packmind/recipes/{slug}.md` file content
#[must_use]
pub fn render_recipe_file(recipe: &RecipeVersion) -> String {
    let mut content = format!("# {}\n\n", recipe.name);
    content.push_str(recipe.content.trim_end());
    content.push('\n');
    content
}

/// Render the list of links to canonical recipe files, one bullet per recipe
#[must_use]
pub fn render_recipe_link_list(recipes: &[RecipeVersion], nesting_depth: usize) -> String {
    let prefix = relative_root_prefix(nesting_depth);
    let mut list = String::new();
    for recipe in recipes {
        let canonical = canonical_recipe_path(&recipe.slug);
        list.push_str(&format!(
            "- [{}]({prefix}{canonical}): {}\n",
            recipe.name,
            recipe.display_summary()
        ));
    }
    list
}

/// Render the body of a recipes index: banner plus link list
#[must_use]
pub fn render_recipes_index_body(
    recipes: &[RecipeVersion],
    nesting_depth: usize,
    app_web_url: &str,
) -> String {
    let mut body = format!(
        "# Packmind recipes\n\nManaged by [Packmind]({app_web_url}).\n\n{RECIPES_BANNER}\n\n"
    );
    if recipes.is_empty() {
        body.push_str("No recipes available.\n");
        return body;
    }
    body.push_str(&render_recipe_link_list(recipes, nesting_depth));
    body
}
