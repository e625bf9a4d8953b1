use crate::{error::RuntimeErrorKind, interpreter::value::core::Value};

/// A rectangular matrix of numeric scalars.
///
/// Rows are stored in order; every cell is an [`Value::Integer`] or
/// [`Value::Float`], enforced at construction. Nested matrices and other
/// non-scalar cells never exist inside a valid `Matrix`.
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    rows: Vec<Vec<Value>>,
}

impl Matrix {
    /// Validates and builds a matrix from evaluated rows.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::value::{core::Value, matrix::Matrix};
    ///
    /// let m = Matrix::from_rows(vec![vec![Value::Integer(1), Value::Integer(2)],
    ///                                vec![Value::Integer(3), Value::Integer(4)],]).unwrap();
    /// assert_eq!(m.row_count(), 2);
    ///
    /// // A matrix cell must be a plain numeric scalar.
    /// let bad = Matrix::from_rows(vec![vec![Value::Boolean(true)]]);
    /// assert!(bad.is_err());
    /// ```
    ///
    /// # Errors
    /// `InvalidMatrixElement` when a cell is not a numeric scalar or the
    /// rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self, RuntimeErrorKind> {
        let width = rows.first().map_or(0, Vec::len);

        for row in &rows {
            if row.len() != width {
                return Err(RuntimeErrorKind::InvalidMatrixElement);
            }
            for cell in row {
                if !cell.is_numeric() {
                    return Err(RuntimeErrorKind::InvalidMatrixElement);
                }
            }
        }

        Ok(Self { rows })
    }

    /// The rows of the matrix.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty matrix).
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Swaps row and column indices.
    ///
    /// An input without any cells (no rows, or rows of width zero)
    /// transposes to the empty matrix.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::value::{core::Value, matrix::Matrix};
    ///
    /// let m = Matrix::from_rows(vec![vec![Value::Integer(1), Value::Integer(2)],
    ///                                vec![Value::Integer(3), Value::Integer(4)],]).unwrap();
    ///
    /// let t = m.transpose();
    /// assert_eq!(t.rows()[0], vec![Value::Integer(1), Value::Integer(3)]);
    /// assert_eq!(t.rows()[1], vec![Value::Integer(2), Value::Integer(4)]);
    /// ```
    #[must_use]
    pub fn transpose(&self) -> Self {
        let width = self.col_count();
        if self.rows.is_empty() || width == 0 {
            return Self { rows: Vec::new() };
        }

        let mut transposed = Vec::with_capacity(width);
        for column in 0..width {
            let mut row = Vec::with_capacity(self.rows.len());
            for source in &self.rows {
                row.push(source[column].clone());
            }
            transposed.push(row);
        }

        Self { rows: transposed }
    }

    /// Computes the closed-form inverse of a 2x2 matrix.
    ///
    /// For `[[a, b], [c, d]]` with determinant `det = a*d - b*c` the
    /// inverse is `[[d/det, -b/det], [-c/det, a/det]]`. All resulting
    /// cells are floats.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::value::{core::Value, matrix::Matrix};
    ///
    /// let m = Matrix::from_rows(vec![vec![Value::Integer(1), Value::Integer(2)],
    ///                                vec![Value::Integer(3), Value::Integer(4)],]).unwrap();
    ///
    /// let inv = m.invert().unwrap();
    /// assert_eq!(inv.rows()[0], vec![Value::Float(-2.0), Value::Float(1.0)]);
    /// assert_eq!(inv.rows()[1], vec![Value::Float(1.5), Value::Float(-0.5)]);
    /// ```
    ///
    /// # Errors
    /// - `UnsupportedDimension` for any shape other than exactly 2x2.
    /// - `NotInvertible` when the determinant is exactly zero.
    pub fn invert(&self) -> Result<Self, RuntimeErrorKind> {
        if self.row_count() != 2 || self.col_count() != 2 {
            return Err(RuntimeErrorKind::UnsupportedDimension { rows: self.row_count(),
                                                                cols: self.col_count(), });
        }

        // from_rows guarantees numeric cells, so as_f64 cannot fail
        let cell = |r: usize, c: usize| {
            self.rows[r][c].as_f64()
                           .unwrap_or_default()
        };
        let (a, b, c, d) = (cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1));

        let determinant = a.mul_add(d, -(b * c));
        if determinant == 0.0 {
            return Err(RuntimeErrorKind::NotInvertible);
        }

        Ok(Self { rows: vec![vec![Value::Float(d / determinant), Value::Float(-b / determinant)],
                             vec![Value::Float(-c / determinant), Value::Float(a / determinant)],], })
    }
}

/// Numeric comparison of two scalar cells; integers and floats compare
/// by value, so `1` equals `1.0`.
#[allow(clippy::cast_precision_loss)]
fn cell_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Integer(x), Value::Float(y)) | (Value::Float(y), Value::Integer(x)) => {
            *x as f64 == *y
        },
        _ => a == b,
    }
}

impl PartialEq for Matrix {
    /// Deep structural equality: dimensions, then cells by numeric value.
    fn eq(&self, other: &Self) -> bool {
        self.rows.len() == other.rows.len()
        && self.rows
               .iter()
               .zip(&other.rows)
               .all(|(left, right)| {
                   left.len() == right.len()
                   && left.iter().zip(right).all(|(a, b)| cell_eq(a, b))
               })
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cell}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
