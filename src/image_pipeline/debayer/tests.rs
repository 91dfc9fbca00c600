use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::debayer::super_pixel::PROGRESS_BATCH_ROWS;
use crate::image_pipeline::debayer::{
    BayerPattern, ProgressMonitor, SuperPixelDebayer, can_execute_on, super_pixel,
};
use crate::image_pipeline::mosaic::{Image, ImageVariant, Sample, SampleKind};

/// 2x2 mosaic laid out row-major: `[(0,0), (1,0), (0,1), (1,1)]`.
fn cell<T: Copy>(values: [T; 4]) -> Image<T> {
    Image::from_vec(2, 2, 1, values.to_vec()).unwrap()
}

/// Mosaic whose value at (col, row) is `row * width + col`.
fn ramp(width: usize, height: usize) -> Image<f64> {
    let data = (0..width * height).map(|i| i as f64).collect();
    Image::from_vec(width, height, 1, data).unwrap()
}

fn rgb<T: Copy>(image: &Image<T>, col: usize, row: usize) -> [T; 3] {
    let i = (row * image.width() + col) * 3;
    [image.data()[i], image.data()[i + 1], image.data()[i + 2]]
}

#[test]
fn rggb_reference_cell() {
    let monitor = ProgressMonitor::new();
    let out = super_pixel(&cell([100u16, 50, 70, 10]), BayerPattern::Rggb, None, &monitor).unwrap();
    assert_eq!((out.width(), out.height(), out.channels()), (1, 1, 3));
    assert_eq!(rgb(&out, 0, 0), [100, 60, 10]);
}

#[test]
fn each_pattern_reads_its_own_sites() {
    // Mosaic values by position: (0,0)=1, (1,0)=2, (0,1)=4, (1,1)=8
    let mosaic = cell([1.0f64, 2.0, 4.0, 8.0]);
    let expected = [
        (BayerPattern::Rggb, [1.0, (2.0 + 4.0) / 2.0, 8.0]),
        (BayerPattern::Bggr, [8.0, (2.0 + 4.0) / 2.0, 1.0]),
        (BayerPattern::Gbrg, [4.0, (1.0 + 8.0) / 2.0, 2.0]),
        (BayerPattern::Grbg, [2.0, (1.0 + 8.0) / 2.0, 4.0]),
    ];
    let monitor = ProgressMonitor::new();
    for (pattern, want) in expected {
        let out = super_pixel(&mosaic, pattern, Some(1), &monitor).unwrap();
        assert_eq!(rgb(&out, 0, 0), want, "{pattern}");
    }
}

#[test]
fn green_is_mean_of_the_two_green_sites() {
    let mosaic = ramp(8, 6);
    let monitor = ProgressMonitor::new();
    for pattern in BayerPattern::ALL {
        let out = super_pixel(&mosaic, pattern, None, &monitor).unwrap();
        for row in 0..3 {
            for col in 0..4 {
                let sites = pattern.resolve(col, row);
                let g1 = mosaic.sample(sites.green1, 0);
                let g2 = mosaic.sample(sites.green2, 0);
                let [r, g, b] = rgb(&out, col, row);
                assert_eq!(g, (g1 + g2) / 2.0, "{pattern} ({col},{row})");
                assert_eq!(r, mosaic.sample(sites.red, 0));
                assert_eq!(b, mosaic.sample(sites.blue, 0));
            }
        }
    }
}

#[test]
fn integer_green_rounds_once() {
    let monitor = ProgressMonitor::new();
    let out = super_pixel(&cell([0u8, 51, 50, 0]), BayerPattern::Rggb, None, &monitor).unwrap();
    assert_eq!(rgb(&out, 0, 0), [0, 51, 0]);

    let out = super_pixel(&cell([7u32, u32::MAX, u32::MAX - 1, 9]), BayerPattern::Rggb, None, &monitor).unwrap();
    assert_eq!(rgb(&out, 0, 0), [7, u32::MAX, 9]);
}

#[test]
fn odd_dimensions_drop_trailing_row_and_column() {
    // 7x5 mosaic: trailing column 6 and row 4 hold a poison value
    let mut data = vec![0.0f32; 7 * 5];
    for row in 0..5 {
        for col in 0..7 {
            data[row * 7 + col] = if col == 6 || row == 4 { 1.0e9 } else { (row * 7 + col) as f32 };
        }
    }
    let mosaic = Image::from_vec(7, 5, 1, data).unwrap();
    let monitor = ProgressMonitor::new();
    let out = super_pixel(&mosaic, BayerPattern::Bggr, None, &monitor).unwrap();

    assert_eq!((out.width(), out.height()), (3, 2));
    assert!(out.data().iter().all(|&v| v < 1.0e9));
}

#[test]
fn worker_count_does_not_change_output() {
    let mosaic = ramp(64, 90);
    let monitor = ProgressMonitor::new();
    for pattern in BayerPattern::ALL {
        let single = super_pixel(&mosaic, pattern, Some(1), &monitor).unwrap();
        for workers in [2, 3, 7, 45, 1000] {
            let many = super_pixel(&mosaic, pattern, Some(workers), &monitor).unwrap();
            let same_bits = single
                .data()
                .iter()
                .zip(many.data())
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same_bits, "{pattern} with {workers} workers");
        }
    }
}

#[test]
fn color_planed_source_reads_matching_plane() {
    // Plane c of every site holds 10^c, scaled by the site index + 1
    let mut data = Vec::new();
    for site in 0..4u32 {
        for plane in 0..3u32 {
            data.push((site + 1) * 10u32.pow(plane));
        }
    }
    let mosaic = Image::from_vec(2, 2, 3, data).unwrap();
    let monitor = ProgressMonitor::new();
    let out = super_pixel(&mosaic, BayerPattern::Rggb, None, &monitor).unwrap();

    // red: site 0 plane 0; green: sites 1,2 plane 1; blue: site 3 plane 2
    assert_eq!(rgb(&out, 0, 0), [1, 25, 400]);
}

#[test]
fn progress_reaches_total() {
    let mosaic = ramp(16, 2 * 37);
    let monitor = ProgressMonitor::new();
    super_pixel(&mosaic, BayerPattern::Grbg, Some(3), &monitor).unwrap();
    assert_eq!(monitor.total(), 37);
    assert_eq!(monitor.completed(), 37);
    assert_eq!(monitor.fraction(), 1.0);
}

#[test]
fn abort_before_start_returns_aborted() {
    let mosaic = ramp(32, 256);
    let monitor = ProgressMonitor::new();
    monitor.request_abort();
    let result = super_pixel(&mosaic, BayerPattern::Rggb, Some(4), &monitor);
    assert!(matches!(result, Err(ConversionError::Aborted)));
    assert_eq!(monitor.completed(), 0);

    let out = super_pixel(&mosaic, BayerPattern::Rggb, Some(4), &monitor).unwrap();
    assert_eq!(out.height(), 128);
}

/// Sample that requests an abort on [`TRIPWIRE_MONITOR`] when a negative
/// value is read, so the abort lands at a known row.
#[derive(Clone, Copy, Debug)]
struct Tripwire(f64);

static TRIPWIRE_MONITOR: ProgressMonitor = ProgressMonitor::new();

impl Sample for Tripwire {
    const KIND: SampleKind = SampleKind::Float64;

    fn to_working(self) -> f64 {
        if self.0 < 0.0 {
            TRIPWIRE_MONITOR.request_abort();
        }
        self.0
    }

    fn from_working(value: f64) -> Self {
        Tripwire(value)
    }
}

#[test]
fn abort_during_run_stops_at_next_batch() {
    let (width, out_rows) = (8, 4096);
    let trip_row = PROGRESS_BATCH_ROWS + 4;
    let mut data = vec![Tripwire(1.0); width * out_rows * 2];
    // red site of output row `trip_row`, column 0
    data[2 * trip_row * width] = Tripwire(-1.0);
    let mosaic = Image::from_vec(width, out_rows * 2, 1, data).unwrap();

    let result = super_pixel(&mosaic, BayerPattern::Rggb, Some(1), &TRIPWIRE_MONITOR);

    assert!(matches!(result, Err(ConversionError::Aborted)));
    assert_eq!(TRIPWIRE_MONITOR.total(), out_rows);
    // the batch holding the trip row finishes, nothing after it starts
    assert_eq!(TRIPWIRE_MONITOR.completed(), 2 * PROGRESS_BATCH_ROWS);
    assert!(!TRIPWIRE_MONITOR.is_aborted());

    let clean = Image::from_vec(width, 64, 1, vec![Tripwire(1.0); width * 64]).unwrap();
    let out = super_pixel(&clean, BayerPattern::Rggb, Some(1), &TRIPWIRE_MONITOR).unwrap();
    assert_eq!(out.height(), 32);
    assert_eq!(TRIPWIRE_MONITOR.completed(), 32);
}

#[test]
fn degenerate_mosaic_is_rejected() {
    let monitor = ProgressMonitor::new();
    let thin = Image::from_vec(1, 8, 1, vec![0u8; 8]).unwrap();
    let result = super_pixel(&thin, BayerPattern::Rggb, None, &monitor);
    assert!(matches!(
        result,
        Err(ConversionError::DegenerateDimensions { width: 1, height: 8 })
    ));
    assert_eq!(monitor.total(), 0);
}

#[test]
fn complex_source_is_rejected_before_processing() {
    let complex = ImageVariant::Complex32(Image::from_vec(4, 4, 1, vec![[0.0, 0.0]; 16]).unwrap());
    assert!(matches!(can_execute_on(&complex), Err(ConversionError::ComplexSample)));

    let monitor = ProgressMonitor::new();
    let result = SuperPixelDebayer::new(BayerPattern::Rggb).process(&complex, &monitor);
    assert!(matches!(result, Err(ConversionError::ComplexSample)));
    assert_eq!(monitor.total(), 0);
}

#[test]
fn debayer_keeps_sample_kind() {
    let monitor = ProgressMonitor::new();
    let debayer = SuperPixelDebayer::new(BayerPattern::Gbrg).with_workers(Some(2));

    let source = ImageVariant::UInt16(Image::from_vec(4, 4, 1, vec![1000u16; 16]).unwrap());
    let out = debayer.process(&source, &monitor).unwrap();
    assert_eq!(out.sample_kind(), SampleKind::UInt16);
    assert_eq!((out.width(), out.height(), out.channels()), (2, 2, 3));

    let source = ImageVariant::Float64(Image::from_vec(2, 2, 1, vec![0.5; 4]).unwrap());
    let out = debayer.process(&source, &monitor).unwrap();
    match out {
        ImageVariant::Float64(image) => assert_eq!(image.data(), &[0.5, 0.5, 0.5]),
        other => panic!("unexpected kind {}", other.sample_kind()),
    }
}
