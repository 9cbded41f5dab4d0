use super::load_definition;
use anyhow::{Context, Result};
use esdsl::Translator;
use std::path::Path;

/// Translate and render a definition without printing the body.
/// Returns the aggregation names found.
pub fn validate_definition(definition: &Path) -> Result<Vec<String>> {
    let def = load_definition(definition)?;
    let source = Translator::translate(&def)
        .with_context(|| format!("Failed to translate {:?}", definition))?;

    // Rendering surfaces errors that only show up at serialization time
    source
        .source()
        .with_context(|| format!("Failed to render {:?}", definition))?;

    Ok(source.aggregation_names().map(str::to_string).collect())
}

pub fn run_validate(definition: &Path) -> Result<()> {
    let names = validate_definition(definition)?;

    println!("{:?}: OK", definition);
    if names.is_empty() {
        println!("  (no aggregations)");
    }
    for name in &names {
        println!("  aggregation: {}", name);
    }
    tracing::debug!(aggregations = names.len(), "Validated definition");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_validate_lists_aggregation_names() {
        let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            "aggs:\n  b_terms:\n    terms: {{ field: status }}\n  a_avg:\n    avg: {{ field: price }}\n"
        )
        .unwrap();

        assert_eq!(
            validate_definition(file.path()).unwrap(),
            vec!["a_avg".to_string(), "b_terms".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_untyped_aggregation() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "aggs:\n  empty:\n    meta: {{ a: 1 }}\n").unwrap();

        let err = validate_definition(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("no recognized type"));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_definition(&dir.path().join("missing.yaml")).is_err());
    }
}
