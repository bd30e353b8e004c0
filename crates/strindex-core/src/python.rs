//! Python bindings for the string service (`--features python`).

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyString};
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::errors::StrIndexError;
use crate::query::filter::StructuredQuery;
use crate::service::StringService;
use crate::store::memory::MemoryStore;
use crate::store::RecordStore;

/// Convert a serializable value into plain Python objects via the json module.
fn to_py<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<PyObject> {
    let json_str = serde_json::to_string(value).map_err(StrIndexError::from)?;
    let json_module = py.import("json")?;
    json_module
        .call_method1("loads", (json_str,))
        .map(|o| o.into())
}

/// In-memory string store with structured and natural-language filtering.
#[pyclass(name = "StringStore")]
pub struct PyStringStore {
    service: StringService<MemoryStore>,
}

#[pymethods]
impl PyStringStore {
    /// Create an empty store configured from `STRINDEX_*` environment variables.
    #[new]
    fn new() -> Self {
        Self {
            service: StringService::with_config(MemoryStore::new(), ServiceConfig::from_env()),
        }
    }

    /// Analyze and store `body["value"]`, returning the stored record.
    fn create_string(&self, py: Python<'_>, body: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        let dict = body
            .downcast::<PyDict>()
            .map_err(|_| StrIndexError::MissingField("value"))?;
        let item = dict
            .get_item("value")?
            .ok_or(StrIndexError::MissingField("value"))?;
        let value = item
            .downcast::<PyString>()
            .map_err(|_| StrIndexError::InvalidType {
                field: "value",
                expected: "string",
            })?
            .to_str()?
            .to_owned();
        let record = self.service.create_value(&value)?;
        to_py(py, &record)
    }

    fn get_string(&self, py: Python<'_>, value: &str) -> PyResult<PyObject> {
        let record = self.service.get(value)?;
        to_py(py, &record)
    }

    fn delete_string(&self, value: &str) -> PyResult<()> {
        self.service.delete(value)?;
        Ok(())
    }

    fn list_strings(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_py(py, &self.service.list())
    }

    #[pyo3(signature = (
        is_palindrome=None,
        min_length=None,
        max_length=None,
        word_count=None,
        contains_character=None,
    ))]
    fn filter_strings(
        &self,
        py: Python<'_>,
        is_palindrome: Option<bool>,
        min_length: Option<i64>,
        max_length: Option<i64>,
        word_count: Option<i64>,
        contains_character: Option<String>,
    ) -> PyResult<PyObject> {
        let query = StructuredQuery {
            is_palindrome,
            min_length,
            max_length,
            word_count,
            contains_character,
        };
        let response = self.service.filter(&query)?;
        to_py(py, &response)
    }

    fn filter_by_natural_language(&self, py: Python<'_>, query: &str) -> PyResult<PyObject> {
        let response = self.service.filter_natural_language(query)?;
        to_py(py, &response)
    }

    fn planner_stats(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_py(py, &self.service.planner_stats())
    }

    fn __len__(&self) -> usize {
        self.service.store().len()
    }
}
