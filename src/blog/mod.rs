// src/blog/mod.rs
// =============================================================================
// This module turns a directory of MDX files into blog posts.
//
// Submodules:
// - front_matter: splits the YAML header from the body
// - loader: scans the directory, builds Post values, sorts them
// - render: markdown body -> HTML
//
// All functions take the content directory explicitly; there is no global
// "posts directory" baked in.
// =============================================================================

mod front_matter;
mod loader;
mod render;

pub use loader::{all_slugs, filter_by_tag, get_by_slug, list_all};
pub use render::render_html;
