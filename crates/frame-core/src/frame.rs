//! The frame value type and its input conversions
//!
//! A [`Frame`] is one reading of the sensor grid: a non-empty 2D array of
//! `f64` cells. Every way of building one goes through validation, so code
//! downstream of a `Frame` never re-checks dimensionality or emptiness.

use crate::error::ValidationError;
use ndarray::{Array2, ArrayD, ArrayView2, Ix2, Zip};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Height and width of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameShape {
    pub height: usize,
    pub width: usize,
}

impl FrameShape {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of cells in a frame of this shape
    pub fn cells(&self) -> usize {
        self.height * self.width
    }

    /// Shape as an ndarray dimension tuple
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

impl From<(usize, usize)> for FrameShape {
    fn from((height, width): (usize, usize)) -> Self {
        Self { height, width }
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// One validated 2D sensor reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    data: Array2<f64>,
}

impl Frame {
    /// Wrap a 2D array, rejecting arrays without cells
    pub fn new(data: Array2<f64>) -> Result<Self, ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::EmptyFrame);
        }
        Ok(Self { data })
    }

    /// Build a frame from row-major values
    pub fn from_shape_vec(
        shape: FrameShape,
        values: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if shape.cells() == 0 {
            return Err(ValidationError::EmptyFrame);
        }
        let actual = values.len();
        let data = Array2::from_shape_vec(shape.as_tuple(), values).map_err(|_| {
            ValidationError::CellCount {
                expected: shape.cells(),
                actual,
            }
        })?;
        Ok(Self { data })
    }

    /// Frame of the given shape with every cell set to `value`
    pub fn filled(shape: FrameShape, value: f64) -> Result<Self, ValidationError> {
        Self::new(Array2::from_elem(shape.as_tuple(), value))
    }

    /// Build a frame from list-of-rows input of any primitive numeric type
    pub fn from_rows<T: ToPrimitive>(rows: &[Vec<T>]) -> Result<Self, ValidationError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(ValidationError::EmptyFrame);
        }

        let mut values = Vec::with_capacity(rows.len() * width);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(ValidationError::RaggedRows {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            for (col, cell) in cells.iter().enumerate() {
                let value = cell
                    .to_f64()
                    .ok_or(ValidationError::NonNumeric { row, col })?;
                values.push(value);
            }
        }

        Self::from_shape_vec(FrameShape::new(rows.len(), width), values)
    }

    pub fn shape(&self) -> FrameShape {
        let (height, width) = self.data.dim();
        FrameShape { height, width }
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    /// Mean over all cells
    pub fn mean(&self) -> f64 {
        // Non-empty by construction
        self.data.mean().unwrap_or(0.0)
    }

    /// Fail unless this frame has the `expected` shape
    pub fn ensure_shape(&self, expected: FrameShape) -> Result<(), ValidationError> {
        let actual = self.shape();
        if actual != expected {
            return Err(ValidationError::ShapeMismatch { expected, actual });
        }
        Ok(())
    }

    /// Mean of `|self - other|` over all cells
    pub fn mean_abs_diff(&self, other: &Frame) -> Result<f64, ValidationError> {
        self.ensure_shape(other.shape())?;
        let total = Zip::from(&self.data)
            .and(&other.data)
            .fold(0.0, |acc, &a, &b| acc + (a - b).abs());
        Ok(total / self.data.len() as f64)
    }
}

impl AsRef<Array2<f64>> for Frame {
    fn as_ref(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Conversion of caller-owned data into a validated [`Frame`]
///
/// Borrowed inputs are copied, so a stored frame never aliases a caller's
/// buffer. `Option` inputs map `None` to [`ValidationError::MissingFrame`].
pub trait IntoFrame {
    fn into_frame(self) -> Result<Frame, ValidationError>;
}

impl IntoFrame for Frame {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Ok(self)
    }
}

impl IntoFrame for &Frame {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Ok(self.clone())
    }
}

impl IntoFrame for Array2<f64> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::new(self)
    }
}

impl IntoFrame for &Array2<f64> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::new(self.to_owned())
    }
}

impl IntoFrame for ArrayView2<'_, f64> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::new(self.to_owned())
    }
}

impl IntoFrame for ArrayD<f64> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        let ndim = self.ndim();
        let data = self
            .into_dimensionality::<Ix2>()
            .map_err(|_| ValidationError::NotTwoDimensional { ndim })?;
        Frame::new(data)
    }
}

impl IntoFrame for &ArrayD<f64> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        self.to_owned().into_frame()
    }
}

impl<T: ToPrimitive> IntoFrame for Vec<Vec<T>> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::from_rows(&self)
    }
}

impl<T: ToPrimitive> IntoFrame for &Vec<Vec<T>> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::from_rows(self)
    }
}

impl<T: ToPrimitive> IntoFrame for &[Vec<T>] {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        Frame::from_rows(self)
    }
}

impl<F: IntoFrame> IntoFrame for Option<F> {
    fn into_frame(self) -> Result<Frame, ValidationError> {
        self.ok_or(ValidationError::MissingFrame)?.into_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, ArrayD, IxDyn};

    #[test]
    fn test_from_rows_accepts_integers() {
        let frame = Frame::from_rows(&[vec![1u16, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(frame.shape(), FrameShape::new(2, 3));
        assert_eq!(frame.data()[[1, 2]], 6.0);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Frame::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let rows: Vec<Vec<f64>> = vec![];
        assert_eq!(Frame::from_rows(&rows).unwrap_err(), ValidationError::EmptyFrame);
        assert_eq!(
            Frame::new(Array2::zeros((0, 4))).unwrap_err(),
            ValidationError::EmptyFrame
        );
    }

    #[test]
    fn test_dynamic_arrays_must_be_2d() {
        let cube = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4]));
        assert_eq!(
            cube.into_frame().unwrap_err(),
            ValidationError::NotTwoDimensional { ndim: 3 }
        );

        let grid = ArrayD::<f64>::zeros(IxDyn(&[3, 4]));
        assert_eq!(grid.into_frame().unwrap().shape(), FrameShape::new(3, 4));
    }

    #[test]
    fn test_missing_frame() {
        let missing: Option<Frame> = None;
        assert_eq!(missing.into_frame().unwrap_err(), ValidationError::MissingFrame);
    }

    #[test]
    fn test_borrowed_input_is_copied() {
        let mut source = array![[1.0, 2.0], [3.0, 4.0]];
        let frame = (&source).into_frame().unwrap();
        source[[0, 0]] = 100.0;
        assert_eq!(frame.data()[[0, 0]], 1.0);
    }

    #[test]
    fn test_mean_abs_diff() {
        let a = Frame::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Frame::new(array![[2.0, 2.0], [1.0, 4.0]]).unwrap();
        assert_relative_eq!(a.mean_abs_diff(&b).unwrap(), 0.75);

        let c = Frame::filled(FrameShape::new(3, 2), 0.0).unwrap();
        assert!(matches!(
            a.mean_abs_diff(&c),
            Err(ValidationError::ShapeMismatch { .. })
        ));
    }
}
