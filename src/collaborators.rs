//! # Query Collaborators
//!
//! Query execution is not part of this crate. Executors that run queries against a reconstructed
//! [SchemaNode](crate::assembler::SchemaNode) implement [Queryable] and report their outcome as a
//! [QueryResult], which serializes to the shape clients expect.

use crate::error::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something that GraphQL queries can be run against.
pub trait Queryable {
    /// Runs a query without variables.
    #[inline]
    fn query(&self, query: &str) -> QueryResult {
        self.query_with_variables(query, &Value::Null)
    }

    fn query_with_variables(&self, query: &str, variables: &Value) -> QueryResult;
}

/// The outcome of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<QueryError>,
}

impl QueryResult {
    pub fn success(data: Value) -> Self {
        QueryResult {
            succeeded: true,
            data,
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<QueryError>) -> Self {
        QueryResult {
            succeeded: false,
            data: Value::Null,
            errors,
        }
    }
}

/// A single error of a failed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    pub error_type: String,
    pub message: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}
