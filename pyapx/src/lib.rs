use std::collections::HashMap;

use apx_core::io::data_file::DataFile;
use apx_core::{LinearProgram, ObjectiveSense, ProblemError};

use indexmap::IndexMap;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn to_py_err(err: ProblemError) -> PyErr {
    match err {
        ProblemError::Solver(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Accept either an expression string or a dict of name to coefficient
fn extract_terms(terms: &Bound<'_, PyAny>) -> PyResult<IndexMap<String, f64>> {
    if let Ok(expression) = terms.extract::<String>() {
        return Ok(apx_core::parse_expression(&expression));
    }
    let dict = terms.downcast::<PyDict>()?;
    let mut parsed = IndexMap::new();
    for (name, coefficient) in dict.iter() {
        parsed.insert(name.extract::<String>()?, coefficient.extract::<f64>()?);
    }
    Ok(parsed)
}

#[pyclass(name = "LinearProgram")]
struct PyLinearProgram {
    inner: LinearProgram,
}

#[pymethods]
impl PyLinearProgram {
    #[new]
    #[pyo3(signature = (objective_type = "max"))]
    fn new(objective_type: &str) -> PyResult<Self> {
        let inner = LinearProgram::with_sense_str(objective_type).map_err(to_py_err)?;
        Ok(PyLinearProgram { inner })
    }

    #[getter]
    fn objective_type(&self) -> String {
        self.inner.sense().to_string()
    }

    #[getter]
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    #[getter]
    fn num_columns(&self) -> usize {
        self.inner.num_columns()
    }

    fn column_number(&mut self, column_name: &str) -> usize {
        self.inner.resolve_column(column_name)
    }

    #[pyo3(signature = (sparse_row, b, name = None))]
    fn add_constraint(
        &mut self,
        sparse_row: &Bound<'_, PyAny>,
        b: f64,
        name: Option<&str>,
    ) -> PyResult<usize> {
        let terms = extract_terms(sparse_row)?;
        self.inner.add_constraint(terms, b, name).map_err(to_py_err)
    }

    fn set_objective(&mut self, sparse_objective: &Bound<'_, PyAny>) -> PyResult<()> {
        let terms = extract_terms(sparse_objective)?;
        self.inner.set_objective(terms);
        Ok(())
    }

    fn to_string(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn dual(&self) -> Self {
        PyLinearProgram {
            inner: self.inner.dual(),
        }
    }

    /// Solve the program, returning the optimal value and a dict of variable values
    fn solve<'py>(&self, py: Python<'py>) -> PyResult<(f64, Bound<'py, PyDict>)> {
        let (value, variable_values) = self.inner.solve().map_err(to_py_err)?.into_parts();
        let solution = PyDict::new(py);
        for (name, variable_value) in variable_values {
            solution.set_item(name, variable_value)?;
        }
        Ok((value, solution))
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json_string()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner =
            LinearProgram::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyLinearProgram { inner })
    }
}

#[pyclass(name = "DataFile", unsendable)]
struct PyDataFile {
    inner: DataFile,
}

#[pymethods]
impl PyDataFile {
    #[new]
    fn new(filename: &str) -> PyResult<Self> {
        let inner = DataFile::open(filename).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyDataFile { inner })
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> PyResult<Option<Vec<String>>> {
        match slf.inner.next() {
            Some(Ok(tokens)) => Ok(Some(tokens)),
            Some(Err(e)) => Err(PyRuntimeError::new_err(e.to_string())),
            None => Ok(None),
        }
    }
}

/// Parse an expression such as "3*x - 2*y" into a dict of name to coefficient
#[pyfunction]
fn parse_expression(expression: &str) -> HashMap<String, f64> {
    apx_core::parse_expression(expression).into_iter().collect()
}

/// Check that an objective type is either "max" or "min"
#[pyfunction]
fn is_objective_type(objective_type: &str) -> bool {
    objective_type.parse::<ObjectiveSense>().is_ok()
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_expression, m)?)?;
    m.add_function(wrap_pyfunction!(is_objective_type, m)?)?;
    m.add_class::<PyLinearProgram>()?;
    m.add_class::<PyDataFile>()?;
    Ok(())
}
