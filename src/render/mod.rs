mod frontmatter;
mod recipe;
mod standard;

pub use frontmatter::{yaml_scalar, Frontmatter};
pub use recipe::{
    canonical_recipe_path, render_recipe_file, render_recipe_link_list,
    render_recipes_index_body, RECIPES_BANNER,
};
pub use standard::{
    canonical_standard_path, relative_root_prefix, render_standard_file, render_standard_link_list,
    render_standard_rules, render_standards_index_body,
};
