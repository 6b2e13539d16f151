use async_trait::async_trait;
use kgschema::graph_source::{GraphSourceError, QueryExecutor, QueryParams, Row};
use serde_json::Value;

/// Answers each query with the rows registered under the first matching fragment.
/// A `limit` parameter truncates the rows like Cypher `LIMIT` would.
#[derive(Default)]
pub struct StaticExecutor {
    responses: Vec<(&'static str, Vec<Row>)>,
}

impl StaticExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fragment: &'static str, rows: Vec<Row>) -> Self {
        self.responses.push((fragment, rows));
        self
    }
}

pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn output_rows(values: Vec<Value>) -> Vec<Row> {
    values.into_iter().map(|v| row(&[("output", v)])).collect()
}

#[async_trait]
impl QueryExecutor for StaticExecutor {
    async fn execute(
        &self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Vec<Row>, GraphSourceError> {
        let limit = params
            .get("limit")
            .and_then(Value::as_u64)
            .map(|n| n as usize);

        for (fragment, rows) in &self.responses {
            if query.contains(fragment) {
                let mut rows = rows.clone();
                if let Some(limit) = limit {
                    rows.truncate(limit);
                }
                return Ok(rows);
            }
        }

        Err(GraphSourceError::QueryFailed {
            code: "Test.UnknownQuery".to_string(),
            message: query.to_string(),
        })
    }
}
