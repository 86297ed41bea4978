use lexvec_core::errors::FilterError;

/// Columns of `document` a filter may reference directly.
const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "content",
    "dataframe",
    "blob",
    "meta",
    "score",
    "embedding",
];

const META_PREFIX: &str = "meta.";

/// Map a filter field to an SQL expression.
///
/// `meta.a.b` becomes `json_extract(meta, '$.a.b')`. Key segments may only
/// hold alphanumerics, `_`, `-` and spaces, so the path is safe to inline.
pub fn resolve_field(field: &str) -> Result<String, FilterError> {
    if let Some(path) = field.strip_prefix(META_PREFIX) {
        let mut json_path = String::from("$");
        for segment in path.split('.') {
            json_path.push('.');
            json_path.push_str(&json_path_segment(field, segment)?);
        }
        return Ok(format!("json_extract(meta, '{json_path}')"));
    }
    if DOCUMENT_FIELDS.contains(&field) {
        return Ok(field.to_string());
    }
    Err(FilterError::UnknownField {
        field: field.to_string(),
    })
}

fn json_path_segment(field: &str, segment: &str) -> Result<String, FilterError> {
    if segment.is_empty() {
        return Err(FilterError::InvalidMetaKey {
            field: field.to_string(),
            reason: "empty key segment".to_string(),
        });
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | ' ')))
    {
        return Err(FilterError::InvalidMetaKey {
            field: field.to_string(),
            reason: format!("unsupported character {bad:?}"),
        });
    }
    let bare = segment
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        Ok(segment.to_string())
    } else {
        Ok(format!("\"{segment}\""))
    }
}
