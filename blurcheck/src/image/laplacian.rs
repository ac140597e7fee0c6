//! Discrete Laplacian and its variance

use imageproc::image::GrayImage;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

// Fixed-size chunks keep the summation order independent of the thread count
const SUM_CHUNK: usize = 4096;

/// Mirror an out-of-range index back into `0..len` without repeating the edge
/// (`gfedcb|abcdefgh|gfedcba`). Only offsets of one step are supported.
#[inline(always)]
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    if i < 0 {
        (-i) as usize
    } else if i >= len {
        (2 * len - 2 - i) as usize
    } else {
        i as usize
    }
}

/// Response of the 4-neighbour Laplacian aperture at `(x, y)`
///
/// ```text
/// 0  1  0
/// 1 -4  1
/// 0  1  0
/// ```
///
/// Inputs are u8, so responses are exact integers in `-1020..=1020`.
#[inline(always)]
fn response(pixels: &[u8], width: usize, height: usize, x: usize, y: usize) -> i32 {
    let at = |x: usize, y: usize| i32::from(pixels[y * width + x]);
    let up = reflect_101(y as isize - 1, height);
    let down = reflect_101(y as isize + 1, height);
    let left = reflect_101(x as isize - 1, width);
    let right = reflect_101(x as isize + 1, width);
    at(x, up) + at(x, down) + at(left, y) + at(right, y) - 4 * at(x, y)
}

/// Apply the Laplacian to every pixel, in row-major order
///
/// Materializes one f64 per pixel; scoring goes through
/// [`laplacian_variance`] instead, which never holds the raster.
pub fn laplacian(img: &GrayImage) -> Vec<f64> {
    let (width, height) = img.dimensions();
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let pixels = img.as_raw();
    let mut out = vec![0.0; width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                *value = f64::from(response(pixels, width, height, x, y));
            }
        });

    out
}

#[inline]
fn ordered_sum<F>(values: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    // collect preserves chunk order, so the final fold is deterministic
    values
        .par_chunks(SUM_CHUNK)
        .map(|chunk| chunk.iter().map(|&v| f(v)).sum::<f64>())
        .collect::<Vec<f64>>()
        .into_iter()
        .sum()
}

/// Population variance (divides by N). Empty input has zero variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = ordered_sum(values, |v| v) / n;
    ordered_sum(values, |v| (v - mean) * (v - mean)) / n
}

/// Sharpness proxy: how widely the edge responses spread
///
/// Streams over rows accumulating exact integer `(sum, sum of squares)`
/// partials, so memory stays independent of the image size and the result
/// does not depend on how rayon splits the rows.
pub fn laplacian_variance(img: &GrayImage) -> f64 {
    let (width, height) = img.dimensions();
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 {
        return 0.0;
    }

    let pixels = img.as_raw();
    let (sum, sum_sq) = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width).fold((0i64, 0i64), |(sum, sum_sq), x| {
                let r = i64::from(response(pixels, width, height, x, y));
                (sum + r, sum_sq + r * r)
            })
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    // n * sum_sq - sum^2 is exact in i128 for any decodable image
    let n = (width * height) as i128;
    let (sum, sum_sq) = (i128::from(sum), i128::from(sum_sq));
    let numerator = n * sum_sq - sum * sum;
    numerator as f64 / (n * n) as f64
}
