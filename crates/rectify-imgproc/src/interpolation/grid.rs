use crate::parallel::{self, ExecutionStrategy};
use rectify_image::{Image, ImageError, ImageSize};

/// Create the coordinate maps of a grid from a per-pixel function.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `strategy` - How the rows are scheduled.
/// * `f` - Maps a grid position `(col, row)` to the coordinates stored at that position.
///
/// # Returns
///
/// A tuple of single channel images of shape (rows, cols) holding the x and y coordinates
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let mut map_x = vec![0.0f32; rows * cols];
    let mut map_y = vec![0.0f32; rows * cols];

    parallel::par_iter_rows_fill(&mut map_x, &mut map_y, cols, strategy, |r, row_x, row_y| {
        for (c, (x, y)) in row_x.iter_mut().zip(row_y.iter_mut()).enumerate() {
            (*x, *y) = f(c, r);
        }
    });

    let size = ImageSize {
        width: cols,
        height: rows,
    };

    Ok((Image::new(size, map_x)?, Image::new(size, map_y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meshgrid_identity() -> Result<(), ImageError> {
        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::ParallelRows] {
            let (map_x, map_y) = meshgrid_from_fn(3, 2, strategy, |x, y| (x as f32, y as f32))?;
            assert_eq!(map_x.size(), [3, 2].into());
            assert_eq!(map_x.as_slice(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
            assert_eq!(map_y.as_slice(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        }
        Ok(())
    }

    #[test]
    fn meshgrid_scaled() -> Result<(), ImageError> {
        let (map_x, map_y) =
            meshgrid_from_fn(2, 2, ExecutionStrategy::Serial, |x, y| {
                (x as f32 * 0.5, y as f32 + 1.0)
            })?;
        assert_eq!(map_x.as_slice(), &[0.0, 0.5, 0.0, 0.5]);
        assert_eq!(map_y.as_slice(), &[1.0, 1.0, 2.0, 2.0]);
        Ok(())
    }
}
