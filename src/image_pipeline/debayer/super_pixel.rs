//! Super-pixel executor
//!
//! Output rows are split into contiguous [`RowRange`]s, one rayon task per
//! range. Each task owns the matching slice of the destination buffer, so the
//! pixel path needs no synchronisation; only the progress counter is shared.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::monitor::ProgressMonitor;
use crate::image_pipeline::debayer::partition::{RowRange, partition_rows, worker_count};
use crate::image_pipeline::debayer::pattern::BayerPattern;
use crate::image_pipeline::mosaic::{Image, Sample};

/// Rows processed between two progress updates / abort checks.
pub const PROGRESS_BATCH_ROWS: usize = 16;

/// Collapses every 2x2 cell of `source` into one RGB pixel.
///
/// The output is `width / 2` x `height / 2`; an odd trailing row or column is
/// never read. Single-plane sources feed all three channels from plane 0;
/// three-plane sources feed red from plane 0, green from plane 1 and blue
/// from plane 2, always at the mosaic site of that color.
///
/// `workers` overrides the number of row ranges (see [`worker_count`]). Fails
/// with [`ConversionError::DegenerateDimensions`] before allocating when the
/// output would be empty, and with [`ConversionError::Aborted`] when
/// `monitor` was asked to abort. The abort request is consumed, so the next
/// run on the same monitor starts clean.
pub fn super_pixel<T: Sample>(
    source: &Image<T>,
    pattern: BayerPattern,
    workers: Option<usize>,
    monitor: &ProgressMonitor,
) -> Result<Image<T>> {
    let width = source.width() / 2;
    let height = source.height() / 2;
    if width == 0 || height == 0 {
        return Err(ConversionError::DegenerateDimensions {
            width: source.width(),
            height: source.height(),
        });
    }

    let row_len = width * 3;
    let mut data = vec![T::from_working(0.0); row_len * height];

    let ranges = partition_rows(height, worker_count(height, workers));
    debug!(
        width,
        height,
        workers = ranges.len(),
        pattern = %pattern,
        "Running super-pixel debayer"
    );

    monitor.initialize(height);
    rayon::scope(|scope| {
        let mut rest = data.as_mut_slice();
        for &range in &ranges {
            let (target, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_len);
            rest = tail;
            scope.spawn(move |_| convert_rows(source, pattern, range, target, monitor));
        }
    });

    if monitor.take_abort() {
        return Err(ConversionError::Aborted);
    }
    Image::from_vec(width, height, 3, data)
}

fn convert_rows<T: Sample>(
    source: &Image<T>,
    pattern: BayerPattern,
    range: RowRange,
    target: &mut [T],
    monitor: &ProgressMonitor,
) {
    let row_len = (source.width() / 2) * 3;
    let [red_plane, green_plane, blue_plane] = if source.is_color() { [0, 1, 2] } else { [0, 0, 0] };

    let mut pending = 0;
    for (row, target_row) in range.rows().zip(target.chunks_exact_mut(row_len)) {
        if pending == 0 && monitor.is_aborted() {
            return;
        }

        for (col, pixel) in target_row.chunks_exact_mut(3).enumerate() {
            let sites = pattern.resolve(col, row);
            let red = source.sample(sites.red, red_plane).to_working();
            let green1 = source.sample(sites.green1, green_plane).to_working();
            let green2 = source.sample(sites.green2, green_plane).to_working();
            let blue = source.sample(sites.blue, blue_plane).to_working();

            pixel[0] = T::from_working(red);
            pixel[1] = T::from_working((green1 + green2) / 2.0);
            pixel[2] = T::from_working(blue);
        }

        pending += 1;
        if pending == PROGRESS_BATCH_ROWS {
            monitor.advance(pending);
            pending = 0;
        }
    }
    monitor.advance(pending);
}
