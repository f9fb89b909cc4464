use anyhow::{bail, Context, Result};
use crm_filter::SavedView;
use serde_json::{Map, Value};
use std::path::Path;

/// Reads rows from a JSON array, a JSON Lines file (`.jsonl`/`.ndjson`) or a
/// YAML sequence (`.yaml`/`.yml`). A single top-level object is one row.
pub fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let content = fs_err::read_to_string(path)
        .with_context(|| format!("Failed to read rows file: {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let document = match extension.as_str() {
        "jsonl" | "ndjson" => return parse_json_lines(&content, path),
        "yaml" | "yml" => serde_yaml_ng::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse YAML rows: {}", path.display()))?,
        _ => serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse JSON rows: {}", path.display()))?,
    };

    match document {
        Value::Array(rows) => Ok(rows),
        Value::Object(_) => Ok(vec![document]),
        Value::Null => Ok(Vec::new()),
        other => bail!(
            "Expected an array of rows in {}, found {}",
            path.display(),
            other
        ),
    }
}

fn parse_json_lines(content: &str, path: &Path) -> Result<Vec<Value>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid JSON on line {} of {}", idx + 1, path.display()))
        })
        .collect()
}

/// Keeps only the columns a view shows. Rows that are not objects pass
/// through unchanged.
pub fn project(row: &Value, view: &SavedView) -> Value {
    match row {
        Value::Object(fields) if !view.visible_columns.is_empty() => {
            let projected: Map<String, Value> = view
                .visible_columns
                .iter()
                .filter_map(|column| fields.get(column).map(|v| (column.clone(), v.clone())))
                .collect();
            Value::Object(projected)
        }
        _ => row.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "rows.json", r#"[{"ftd": 500}, {"ftd": 1500}]"#);
        assert_eq!(load_rows(&path).unwrap(), vec![json!({"ftd": 500}), json!({"ftd": 1500})]);
    }

    #[test]
    fn test_single_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "row.json", r#"{"ftd": 500}"#);
        assert_eq!(load_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "rows.jsonl", "{\"a\": 1}\n\n{\"a\": 2}\n");
        assert_eq!(load_rows(&path).unwrap().len(), 2);

        let bad = write(&dir, "bad.jsonl", "{\"a\": 1}\n{oops\n");
        let err = load_rows(&bad).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "rows.yaml",
            "- leadStatus: Hot\n  ftd: 1500\n- leadStatus: Cold\n  kycVerified: \"yes\"\n",
        );
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows[0], json!({"leadStatus": "Hot", "ftd": 1500}));
        assert_eq!(rows[1]["kycVerified"], json!("yes"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "rows.json", "42");
        assert!(load_rows(&path).is_err());
    }

    #[test]
    fn test_project_visible_columns() {
        let view = SavedView::new("v", vec![], vec!["id".to_string(), "missing".to_string()]);
        let row = json!({"id": "C-1", "email": "a@b.c"});
        assert_eq!(project(&row, &view), json!({"id": "C-1"}));

        let all = SavedView::new("all", vec![], vec![]);
        assert_eq!(project(&row, &all), row);
    }
}
