//! Property tests for frame construction and comparison

use frame_core::{Frame, FrameShape, IntoFrame, ValidationError};
use ndarray::Array2;
use proptest::prelude::*;

fn grid() -> impl Strategy<Value = (usize, usize, Vec<f64>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(h, w)| {
        (
            Just(h),
            Just(w),
            proptest::collection::vec(-1e3..1e3f64, h * w),
        )
    })
}

proptest! {
    // Property: row lists and arrays with the same cells give the same frame
    #[test]
    fn prop_rows_and_arrays_agree((h, w, cells) in grid()) {
        let rows: Vec<Vec<f64>> = cells.chunks(w).map(|r| r.to_vec()).collect();
        let from_rows = rows.into_frame().unwrap();
        let from_array = Array2::from_shape_vec((h, w), cells).unwrap().into_frame().unwrap();

        prop_assert_eq!(from_rows.shape(), FrameShape::new(h, w));
        prop_assert_eq!(from_rows, from_array);
    }

    // Property: mean absolute difference is symmetric, non-negative and zero on itself
    #[test]
    fn prop_mean_abs_diff_is_a_distance(
        (h, w, a) in grid(),
        offset in -10.0..10.0f64,
    ) {
        let first = Frame::from_shape_vec(FrameShape::new(h, w), a.clone()).unwrap();
        let second =
            Frame::from_shape_vec(FrameShape::new(h, w), a.iter().map(|v| v + offset).collect())
                .unwrap();

        let forward = first.mean_abs_diff(&second).unwrap();
        let backward = second.mean_abs_diff(&first).unwrap();
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert!((forward - offset.abs()).abs() < 1e-9);
        prop_assert_eq!(first.mean_abs_diff(&first).unwrap(), 0.0);
    }

    // Property: frames of different shapes are never compared
    #[test]
    fn prop_shape_mismatch_is_reported(h in 1usize..6, w in 1usize..6) {
        let frame = Frame::filled(FrameShape::new(h, w), 1.0).unwrap();
        let other = Frame::filled(FrameShape::new(h + 1, w), 1.0).unwrap();

        prop_assert_eq!(
            frame.mean_abs_diff(&other).unwrap_err(),
            ValidationError::ShapeMismatch {
                expected: FrameShape::new(h + 1, w),
                actual: FrameShape::new(h, w),
            }
        );
    }
}
