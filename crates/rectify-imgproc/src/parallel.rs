use rayon::prelude::*;

use rectify_image::Image;

/// Controls how the per-row work of an operation is scheduled.
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
}

/// Fill two row-major buffers of the same shape row by row.
///
/// `f` receives the row index and the matching row of each buffer.
///
/// PRECONDITION: both buffers hold a whole number of rows of `cols` elements.
pub fn par_iter_rows_fill<T: Send>(
    a: &mut [T],
    b: &mut [T],
    cols: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T], &mut [T]) + Send + Sync,
) {
    if cols == 0 {
        return;
    }

    match strategy {
        ExecutionStrategy::Serial => a
            .chunks_exact_mut(cols)
            .zip(b.chunks_exact_mut(cols))
            .enumerate()
            .for_each(|(r, (row_a, row_b))| f(r, row_a, row_b)),
        ExecutionStrategy::ParallelRows => a
            .par_chunks_exact_mut(cols)
            .zip(b.par_chunks_exact_mut(cols))
            .enumerate()
            .for_each(|(r, (row_a, row_b))| f(r, row_a, row_b)),
    }
}

/// Apply a function to each pixel for grid sampling.
///
/// `f` receives the source coordinates read from `map_x` and `map_y` and the destination
/// pixel they belong to.
///
/// PRECONDITION: `map_x` and `map_y` have the same size as `dst`.
pub fn par_iter_rows_resample<T: Send, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    strategy: ExecutionStrategy,
    f: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) {
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    let resample_row = |((dst_chunk, map_x_chunk), map_y_chunk): ((&mut [T], &[f32]), &[f32])| {
        dst_chunk
            .chunks_exact_mut(C)
            .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
            .for_each(|(dst_pixel, (x, y))| {
                f(x, y, dst_pixel);
            });
    };

    let dst_slice = dst.as_slice_mut();
    let map_x_slice = map_x.as_slice();
    let map_y_slice = map_y.as_slice();

    match strategy {
        ExecutionStrategy::Serial => dst_slice
            .chunks_exact_mut(C * cols)
            .zip(map_x_slice.chunks_exact(cols))
            .zip(map_y_slice.chunks_exact(cols))
            .for_each(resample_row),
        ExecutionStrategy::ParallelRows => dst_slice
            .par_chunks_exact_mut(C * cols)
            .zip(map_x_slice.par_chunks_exact(cols))
            .zip(map_y_slice.par_chunks_exact(cols))
            .for_each(resample_row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectify_image::{ImageError, ImageSize};

    #[test]
    fn test_fill_rows() {
        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::ParallelRows] {
            let mut a = vec![0; 6];
            let mut b = vec![0; 6];
            par_iter_rows_fill(&mut a, &mut b, 3, strategy, |r, row_a, row_b| {
                for (c, (va, vb)) in row_a.iter_mut().zip(row_b.iter_mut()).enumerate() {
                    *va = c;
                    *vb = r;
                }
            });
            assert_eq!(a, vec![0, 1, 2, 0, 1, 2]);
            assert_eq!(b, vec![0, 0, 0, 1, 1, 1]);
        }
    }

    #[test]
    fn test_resample_rows() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let map_x = Image::<f32, 1>::new(size, vec![0.0, 1.0, 2.0, 3.0])?;
        let map_y = Image::<f32, 1>::new(size, vec![10.0, 20.0, 30.0, 40.0])?;

        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::ParallelRows] {
            let mut dst = Image::<f32, 2>::from_size_val(size, 0.0)?;
            par_iter_rows_resample(&mut dst, &map_x, &map_y, strategy, |&x, &y, pixel| {
                pixel[0] = x;
                pixel[1] = y;
            });
            assert_eq!(
                dst.as_slice(),
                &[0.0, 10.0, 1.0, 20.0, 2.0, 30.0, 3.0, 40.0]
            );
        }
        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 0,
            height: 3,
        };
        let map = Image::<f32, 1>::new(size, vec![])?;
        let mut dst = Image::<u8, 3>::new(size, vec![])?;
        par_iter_rows_resample(&mut dst, &map, &map, ExecutionStrategy::default(), |_, _, _| {
            unreachable!()
        });
        Ok(())
    }
}
