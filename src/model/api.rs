use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Error body for rejected input, naming the offending fields.
#[derive(Serialize, Deserialize)]
pub struct ValidationErrorDto {
    pub error: String,
    pub fields: BTreeMap<String, String>,
}

/// A page of results.
#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedDto<T> {
    pub count: u64,
    pub per_page: u64,
    pub results: Vec<T>,
}

/// A list of resolved permission strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermissionsDto {
    pub perms: Vec<String>,
}
