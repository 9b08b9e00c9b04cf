// Entity keyword records and the entity info JSON loader.
//
// The entity info file is a JSON array of objects:
//
//   [{"id": 17, "keywords": ["jazz", "sax"], "scores": [0.82, 0.41]}, ...]
//
// Keywords are the entity's representative words, already ordered by
// descending TF-IDF score. That order is trusted and never re-sorted.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{GraphError, Result};

/// A keyword and its TF-IDF score.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore {
    pub word: String,
    pub score: f64,
}

impl KeywordScore {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// One entity with its keywords, highest score first.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityKeywordRecord {
    pub id: String,
    pub keywords: Vec<KeywordScore>,
}

impl EntityKeywordRecord {
    pub fn new<S: Into<String>>(id: impl Into<String>, keywords: Vec<(S, f64)>) -> Self {
        Self {
            id: id.into(),
            keywords: keywords
                .into_iter()
                .map(|(w, s)| KeywordScore::new(w, s))
                .collect(),
        }
    }

    /// True when scores never increase from one keyword to the next.
    pub fn is_descending(&self) -> bool {
        self.keywords.windows(2).all(|w| w[0].score >= w[1].score)
    }
}

#[derive(Deserialize)]
struct RawEntity {
    id: Value,
    keywords: Vec<String>,
    scores: Vec<f64>,
}

/// Load entity records from a JSON file.
pub fn load_entity_info(path: &Path) -> Result<Vec<EntityKeywordRecord>> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    let records = parse_entity_info(BufReader::new(file), path)?;
    info!(entities = records.len(), path = %path.display(), "Loaded entity info");
    Ok(records)
}

/// Parse entity records from any reader. `path` is only used in errors.
///
/// A repeated entity id replaces the earlier record's keywords but keeps
/// the earlier position.
pub fn parse_entity_info<R: Read>(reader: R, path: &Path) -> Result<Vec<EntityKeywordRecord>> {
    let raw: Vec<RawEntity> = serde_json::from_reader(reader)
        .map_err(|e| GraphError::parse(path, e.line(), e.to_string()))?;

    let mut records: Vec<EntityKeywordRecord> = Vec::with_capacity(raw.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(raw.len());

    for (n, entity) in raw.into_iter().enumerate() {
        let id = coerce_id(&entity.id).ok_or_else(|| {
            GraphError::parse(
                path,
                0,
                format!("entity #{n}: id must be a scalar, got {}", entity.id),
            )
        })?;

        if entity.keywords.len() != entity.scores.len() {
            return Err(GraphError::parse(
                path,
                0,
                format!(
                    "entity {id:?}: {} keywords but {} scores",
                    entity.keywords.len(),
                    entity.scores.len()
                ),
            ));
        }

        let record = EntityKeywordRecord {
            id: id.clone(),
            keywords: entity
                .keywords
                .into_iter()
                .zip(entity.scores)
                .map(|(word, score)| KeywordScore { word, score })
                .collect(),
        };

        if !record.is_descending() {
            warn!(entity = %id, "Keyword scores are not in descending order; keeping file order");
        }

        match positions.get(&id).copied() {
            Some(pos) => {
                warn!(entity = %id, "Repeated entity id; later record replaces earlier one");
                records[pos] = record;
            }
            None => {
                positions.insert(id, records.len());
                records.push(record);
            }
        }
    }

    Ok(records)
}

/// Entity ids may be any JSON scalar; they are used as strings.
fn coerce_id(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<EntityKeywordRecord>> {
        parse_entity_info(json.as_bytes(), Path::new("info.json"))
    }

    #[test]
    fn test_parse_basic() {
        let records = parse(
            r#"[{"id": "e1", "keywords": ["a", "b"], "scores": [0.9, 0.5]},
                {"id": 42, "keywords": [], "scores": []}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], EntityKeywordRecord::new("e1", vec![("a", 0.9), ("b", 0.5)]));
        assert_eq!(records[1].id, "42");
        assert!(records[1].keywords.is_empty());
    }

    #[test]
    fn test_scalar_ids_are_coerced() {
        let records = parse(
            r#"[{"id": 3.5, "keywords": [], "scores": []},
                {"id": true, "keywords": [], "scores": []}]"#,
        )
        .unwrap();
        assert_eq!(records[0].id, "3.5");
        assert_eq!(records[1].id, "true");
    }

    #[test]
    fn test_null_id_is_parse_error() {
        let err = parse(r#"[{"id": null, "keywords": [], "scores": []}]"#).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let err = parse(r#"[{"id": "e1", "keywords": ["a"]}]"#).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_length_mismatch_is_parse_error() {
        let err = parse(r#"[{"id": "e1", "keywords": ["a", "b"], "scores": [0.9]}]"#).unwrap_err();
        assert!(err.to_string().contains("2 keywords but 1 scores"), "{err}");
    }

    #[test]
    fn test_not_an_array_is_parse_error() {
        assert!(parse(r#"{"id": "e1"}"#).is_err());
    }

    #[test]
    fn test_repeated_id_later_wins() {
        let records = parse(
            r#"[{"id": "e1", "keywords": ["a"], "scores": [0.9]},
                {"id": "e2", "keywords": ["b"], "scores": [0.8]},
                {"id": "e1", "keywords": ["c"], "scores": [0.7]}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "e1");
        assert_eq!(records[0].keywords[0].word, "c");
    }

    #[test]
    fn test_order_is_not_resorted() {
        let records = parse(r#"[{"id": "e1", "keywords": ["lo", "hi"], "scores": [0.1, 0.9]}]"#).unwrap();
        assert!(!records[0].is_descending());
        assert_eq!(records[0].keywords[0].word, "lo");
    }
}
