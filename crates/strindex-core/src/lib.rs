//! strindex core library: analyzed string storage with structured and
//! natural-language filtering.
//!
//! Strings are stored under their SHA-256 content hash together with derived
//! properties (length, palindrome flag, word count, character frequencies).
//! Queries arrive either as explicit parameters or as a free-text sentence;
//! both are reduced to a [`query::filter::FilterSpec`] and run through the same
//! filter engine. With the `python` feature the crate also builds as the
//! `_strindex_core` Python extension module.

pub mod config;
pub mod errors;
pub mod indexer;
pub mod models;
pub mod query;
pub mod service;
pub mod store;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

// ---------------------------------------------------------------------------
// Top-level Python module: _strindex_core
// ---------------------------------------------------------------------------

#[cfg(feature = "python")]
#[pymodule]
fn _strindex_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // -- Service --------------------------------------------------------------
    m.add_class::<python::PyStringStore>()?;

    // -- Query guards ---------------------------------------------------------
    m.add("MAX_QUERY_LENGTH", query::guards::MAX_QUERY_LENGTH)?;
    m.add("MAX_PLANNER_ENTRIES", query::guards::MAX_PLANNER_ENTRIES)?;

    Ok(())
}
