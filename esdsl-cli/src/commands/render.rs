use super::load_definition;
use anyhow::{Context, Result};
use esdsl::Translator;
use std::fs;
use std::path::Path;

/// Render a definition file into a request body string
pub fn render_definition(definition: &Path, pretty: bool) -> Result<String> {
    let def = load_definition(definition)?;
    let body = Translator::translate(&def)
        .and_then(|source| source.source())
        .with_context(|| format!("Failed to render {:?}", definition))?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    Ok(rendered)
}

/// Run render command: print the body, or write it to `output`
pub fn run_render(definition: &Path, pretty: bool, output: Option<&Path>) -> Result<()> {
    let rendered = render_definition(definition, pretty)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote request body to {:?}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_render_yaml_compact() {
        let file = yaml_file(
            "size: 0\naggs:\n  messages:\n    filters:\n      filters:\n        - term: { body: error }\n",
        );
        let rendered = render_definition(file.path(), false).unwrap();
        assert_eq!(
            rendered,
            r#"{"aggregations":{"messages":{"filters":{"filters":[{"term":{"body":"error"}}]}}},"size":0}"#
        );
    }

    #[test]
    fn test_render_json_definition_pretty() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"query": {{"exists": {{"field": "email"}}}}}}"#).unwrap();

        let rendered = render_definition(file.path(), true).unwrap();
        assert!(rendered.contains('\n'));
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"query": {"exists": {"field": "email"}}}));
    }

    #[test]
    fn test_render_writes_output_file() {
        let file = yaml_file("size: 5\n");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("body.json");

        run_render(file.path(), false, Some(out.as_path())).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "{\"size\":5}\n");
    }

    #[test]
    fn test_render_reports_bad_range() {
        let file = yaml_file("query:\n  range:\n    price: { boost: 2.0 }\n");
        let err = render_definition(file.path(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("no bounds"));
    }
}
