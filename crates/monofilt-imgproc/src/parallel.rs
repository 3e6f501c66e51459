use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0")]
    InvalidRowStride,
}

/// Controls how per-row operations are executed.
///
/// Every strategy produces the same output: rows are independent and each
/// output sample is computed by a single thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Fill `dst` row by row with the given strategy.
///
/// `dst` is split into consecutive rows of `stride` elements; `op` receives the
/// row index and the mutable row slice.
///
/// # Errors
///
/// Returns [`ParallelError::InvalidRowStride`] for a zero stride,
/// [`ParallelError::InvalidThreadCount`] for `Fixed(0)` and
/// [`ParallelError::BuildError`] if the local pool cannot be built.
pub fn for_each_row<T, F>(
    dst: &mut [T],
    stride: usize,
    strategy: ExecutionStrategy,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride);
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_mut(stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_mut(stride)
                    .enumerate()
                    .for_each(|(r, row)| op(r, row));
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0; 6];
        for_each_row(&mut dst, 3, strategy, |r, row| {
            row.iter_mut().enumerate().for_each(|(c, v)| *v = r * 10 + c);
        })?;
        Ok(dst)
    }

    #[test]
    fn test_execute_serial() -> Result<(), ParallelError> {
        assert_eq!(fill(ExecutionStrategy::Serial)?, vec![0, 1, 2, 10, 11, 12]);
        Ok(())
    }

    #[test]
    fn test_execute_parallel_rows() -> Result<(), ParallelError> {
        assert_eq!(
            fill(ExecutionStrategy::ParallelRows)?,
            vec![0, 1, 2, 10, 11, 12]
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(fill(ExecutionStrategy::Fixed(2))?, vec![0, 1, 2, 10, 11, 12]);
        Ok(())
    }

    #[test]
    fn test_execute_fixed_error() {
        let res = fill(ExecutionStrategy::Fixed(0));
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_execute_invalid_stride() {
        let mut dst = vec![0u8; 4];
        let res = for_each_row(&mut dst, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride));
    }
}
