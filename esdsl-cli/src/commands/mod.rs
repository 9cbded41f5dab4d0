pub mod render;
pub mod validate;

pub use render::run_render;
pub use validate::run_validate;

use anyhow::{Context, Result};
use esdsl::SearchDefinition;
use std::fs;
use std::path::Path;

/// Read a definition file; `.json` is parsed as JSON, anything else as YAML
pub fn load_definition(path: &Path) -> Result<SearchDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read definition at {:?}", path))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let definition = if is_json {
        SearchDefinition::from_json_str(&content)
    } else {
        SearchDefinition::from_yaml_str(&content)
    };
    definition.with_context(|| format!("Invalid definition in {:?}", path))
}
