//! Integration tests for the cached inverse

use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;
use matcache_core::prelude::*;
use matcache_core::{identity, is_identity, matmul};
use ndarray::{array, Array2};
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.contents())
}

struct CountingInverter {
    calls: Cell<usize>,
}

impl Inverter for CountingInverter {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn invert(&self, matrix: &Matrix, options: &SolveOptions) -> Result<Matrix> {
        self.calls.set(self.calls.get() + 1);
        GaussJordan.invert(matrix, options)
    }
}

fn assert_matrix_close(actual: &Matrix, expected: &Matrix) {
    assert_eq!(actual.dim(), expected.dim());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
    }
}

#[test]
fn test_worked_example() -> Result<()> {
    let mut holder = CachedMatrix::new(array![[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
    let expected = array![[-24.0, 18.0, 5.0], [20.0, -15.0, -4.0], [-5.0, 4.0, 1.0]];

    let (first, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    let first = first?;
    assert_matrix_close(&first, &expected);
    assert!(!logs.contains("getting cached data"));

    let (second, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    let second = second?;
    assert_eq!(second, first);
    assert!(logs.contains("getting cached data"));

    holder.set_matrix(identity(3));
    assert!(holder.cached_inverse().is_none());

    let (third, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    assert_eq!(third?, identity(3));
    assert!(!logs.contains("getting cached data"));

    Ok(())
}

#[test]
fn test_repeated_solves_invoke_primitive_once() -> Result<()> {
    let inverter = CountingInverter { calls: Cell::new(0) };
    let mut holder = CachedMatrix::new(array![[4.0, 7.0], [2.0, 6.0]]);

    let first = cache_solve_with(&mut holder, &inverter, &SolveOptions::default())?;
    for _ in 0..10 {
        let again = cache_solve_with(&mut holder, &inverter, &SolveOptions::default())?;
        assert_eq!(again, first);
    }

    assert_eq!(inverter.calls.get(), 1);
    assert_eq!(holder.stats().hits, 10);
    assert_eq!(holder.stats().misses, 1);
    Ok(())
}

#[test]
fn test_no_stale_inverse_after_replace() -> Result<()> {
    let inverter = CountingInverter { calls: Cell::new(0) };
    let m1 = array![[2.0, 0.0], [0.0, 2.0]];
    let m2 = array![[1.0, 1.0], [0.0, 1.0]];
    let mut holder = CachedMatrix::new(m1);

    let inv1 = cache_solve_with(&mut holder, &inverter, &SolveOptions::default())?;
    holder.set_matrix(m2.clone());
    let inv2 = cache_solve_with(&mut holder, &inverter, &SolveOptions::default())?;

    assert_ne!(inv1, inv2);
    assert_matrix_close(&inv2, &array![[1.0, -1.0], [0.0, 1.0]]);
    assert!(is_identity(&matmul(&m2, &inv2)?, 1e-12));
    assert_eq!(inverter.calls.get(), 2);
    assert_eq!(holder.generation(), 1);
    Ok(())
}

#[test]
fn test_extreme_magnitudes_round_trip_or_fail() -> Result<()> {
    let mut holder = CachedMatrix::new(array![[1e308, 1e308], [-1e308, 1e308]]);
    let inv = cache_solve(&mut holder, &SolveOptions::default())?;
    let expected = [[0.5, -0.5], [0.5, 0.5]];
    for ((r, c), v) in inv.indexed_iter() {
        assert_abs_diff_eq!(v * 1e308, expected[r][c], epsilon = 1e-9);
    }
    assert_eq!(holder.cached_inverse(), Some(&inv));

    // 1 / 1e-310 is not representable
    holder.set_matrix(array![[1e-310]]);
    let err = cache_solve(&mut holder, &SolveOptions::default()).unwrap_err();
    assert!(matches!(err, MatrixError::NonFinite { .. }));
    assert!(holder.cached_inverse().is_none());
    Ok(())
}

#[test]
fn test_nan_matrix_leaves_cache_empty() {
    let mut holder = CachedMatrix::new(array![[1.0, f64::NAN], [0.0, 1.0]]);

    let err = cache_solve(&mut holder, &SolveOptions::default()).unwrap_err();
    assert_eq!(err.code(), "MATRIX_NON_FINITE");
    assert!(err.is_numerical_error());
    assert!(holder.cached_inverse().is_none());
    assert_eq!(holder.stats().failures, 1);
}

#[test]
fn test_ill_conditioned_pivot_warns() -> Result<()> {
    let mut holder = CachedMatrix::new(array![[1.0, 0.0], [0.0, 1e-10]]);

    let (result, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    let inv = result?;
    assert_abs_diff_eq!(inv[[1, 1]], 1e10, epsilon = 1e-3);
    assert!(logs.contains("pivot close to singularity threshold"));

    holder.set_matrix(identity(2));
    let (_, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    assert!(!logs.contains("pivot close to singularity threshold"));
    Ok(())
}

#[test]
fn test_singular_matrix_leaves_cache_empty() {
    let mut holder = CachedMatrix::new(Array2::zeros((2, 2)));

    let (result, logs) = with_captured_logs(|| cache_solve(&mut holder, &SolveOptions::default()));
    let err = result.unwrap_err();

    assert!(matches!(err, MatrixError::SingularMatrix { .. }));
    assert!(holder.cached_inverse().is_none());
    assert_eq!(holder.state(), CacheState::Empty);
    assert!(!logs.contains("getting cached data"));
}

#[test]
fn test_recovery_after_failure() -> Result<()> {
    let mut holder = CachedMatrix::new(array![[1.0, 2.0], [2.0, 4.0]]);
    assert!(cache_solve(&mut holder, &SolveOptions::default()).is_err());

    holder.set_matrix(array![[1.0, 2.0], [3.0, 4.0]]);
    let inv = cache_solve(&mut holder, &SolveOptions::default())?;
    assert_matrix_close(&inv, &array![[-2.0, 1.0], [1.5, -0.5]]);
    assert_eq!(holder.state(), CacheState::Populated);
    Ok(())
}

#[test]
fn test_non_square_matrix_is_dimension_mismatch() {
    let mut holder = CachedMatrix::default();
    holder.set_matrix(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

    let err = cache_solve(&mut holder, &SolveOptions::default()).unwrap_err();
    assert!(matches!(err, MatrixError::DimensionMismatch { .. }));
    assert!(err.is_shape_error());
    assert!(holder.cached_inverse().is_none());
}

#[test]
fn test_cached_value_returned_regardless_of_options() -> Result<()> {
    let mut holder = CachedMatrix::new(array![[2.0, 0.0], [0.0, 4.0]]);
    let inv = cache_solve(&mut holder, &SolveOptions::default())?;

    // a populated slot is returned without consulting the options
    let options = SolveOptions::new().with_rhs(array![[1.0], [1.0]]);
    let again = cache_solve(&mut holder, &options)?;
    assert_eq!(again, inv);
    Ok(())
}

#[test]
fn test_dyn_inverter() -> Result<()> {
    let inverter: Box<dyn Inverter> = Box::new(GaussJordan::new());
    let mut holder = CachedMatrix::new(array![[0.5]]);
    let inv = cache_solve_with(&mut holder, inverter.as_ref(), &SolveOptions::default())?;
    assert_eq!(inv, array![[2.0]]);
    Ok(())
}
