use crate::algorithms::{interp, is_ascending};
use crate::errors::{AirfoilError, Result};
use crate::serialize::AirfoilRecord;
use itertools::Itertools;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Index, Mul, Sub};
use std::slice::SliceIndex;
use tracing::trace;

pub mod generate;
pub mod transform;

/// One half of an airfoil boundary, produced by splitting the boundary at an index. The points
/// keep the order they had on the airfoil.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    points: Vec<Point2<f64>>,
}

impl Surface {
    fn new(points: &[Point2<f64>]) -> Surface {
        Surface {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// The x coordinates of the surface, the first row of the 2xM layout
    pub fn x(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// The y coordinates of the surface, the second row of the 2xM layout
    pub fn y(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn reversed(&self) -> Surface {
        let mut points = self.points.clone();
        points.reverse();
        Surface { points }
    }
}

/// The arithmetic operations which can be applied to an airfoil with `Airfoil::apply`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
        }
    }
}

/// The right hand side of an arithmetic operation on an airfoil.
#[derive(Debug, Copy, Clone)]
pub enum Operand<'a> {
    Scalar(f64),
    Array(&'a [f64]),
    Airfoil(&'a Airfoil),
}

impl<'a> Operand<'a> {
    fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Array(_) => "array",
            Operand::Airfoil(_) => "Airfoil",
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(value: &'a [f64]) -> Self {
        Operand::Array(value)
    }
}

impl<'a> From<&'a Airfoil> for Operand<'a> {
    fn from(value: &'a Airfoil) -> Self {
        Operand::Airfoil(value)
    }
}

/// An airfoil section represented as a closed loop of boundary points. By convention the loop
/// runs from the trailing edge along the upper surface to the leading edge, then back along the
/// lower surface to the trailing edge.
///
/// An `Airfoil` is an immutable value. The number of points is fixed at construction and every
/// arithmetic operation produces a new airfoil which uses the x coordinates of the left hand
/// operand as its grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AirfoilRecord", into = "AirfoilRecord")]
pub struct Airfoil {
    points: Vec<Point2<f64>>,
    le: usize,
}

impl Airfoil {
    /// Create an airfoil from an ordered sequence of boundary points. The leading edge is taken
    /// to be the first point with the minimum x coordinate.
    pub fn from_points(points: Vec<Point2<f64>>) -> Result<Airfoil> {
        if points.len() < 2 {
            return Err(AirfoilError::NotEnoughPoints {
                found: points.len(),
            });
        }

        if let Some(p) = points.iter().find(|p| !p.x.is_finite()) {
            return Err(AirfoilError::InvalidParameter {
                name: "x",
                value: p.x,
            });
        }

        if let Some(p) = points.iter().find(|p| !p.y.is_finite()) {
            return Err(AirfoilError::InvalidParameter {
                name: "y",
                value: p.y,
            });
        }

        let le = points
            .iter()
            .position_min_by(|a, b| a.x.total_cmp(&b.x))
            .unwrap_or(0);

        Ok(Airfoil { points, le })
    }

    /// Create an airfoil from separate x and y coordinate sequences of equal length.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Airfoil> {
        if x.len() != y.len() {
            return Err(AirfoilError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        Airfoil::from_points(
            x.iter()
                .zip(y.iter())
                .map(|(&x, &y)| Point2::new(x, y))
                .collect(),
        )
    }

    /// Create an airfoil from a stacked 2xN layout, where the first row holds the x coordinates
    /// and the second row holds the y coordinates. Any number of rows other than two is a shape
    /// error.
    pub fn from_stacked(rows: &[Vec<f64>]) -> Result<Airfoil> {
        match rows {
            [x, y] => Airfoil::from_xy(x, y),
            _ => Err(AirfoilError::Shape { rows: rows.len() }),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, an airfoil has at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    pub fn x(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// The index of the leading edge point, the point of minimum x
    pub fn leading_edge_index(&self) -> usize {
        self.le
    }

    pub fn leading_edge(&self) -> Point2<f64> {
        self.points[self.le]
    }

    /// Read the points at the given indices.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Point2<f64>>> {
        indices
            .iter()
            .map(|&i| {
                self.points
                    .get(i)
                    .copied()
                    .ok_or_else(|| AirfoilError::IndexOutOfBounds {
                        index: i,
                        len: self.len(),
                    })
            })
            .collect()
    }

    /// Points of an airfoil cannot be assigned individually, only whole airfoil arithmetic
    /// produces new geometry. This always fails.
    pub fn assign(&mut self, _index: usize, _point: Point2<f64>) -> Result<()> {
        Err(AirfoilError::UnsupportedOperation(
            "assigning to individual airfoil points",
        ))
    }

    fn split_unchecked(&self, index: usize) -> (Surface, Surface) {
        let (upper, lower) = self.points.split_at(index);
        (Surface::new(lower), Surface::new(upper))
    }

    /// Split the airfoil at the leading edge, returning the `(lower, upper)` surfaces. The lower
    /// surface starts with the leading edge point.
    pub fn split(&self) -> (Surface, Surface) {
        self.split_unchecked(self.le)
    }

    /// Split the airfoil at an arbitrary index, returning `(lower, upper)` where the lower
    /// surface holds the points from `index` onward and the upper surface holds the points
    /// before it. An index equal to the length produces an empty lower surface, anything beyond
    /// that is an error.
    pub fn split_at(&self, index: usize) -> Result<(Surface, Surface)> {
        if index > self.len() {
            return Err(AirfoilError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }

        Ok(self.split_unchecked(index))
    }

    /// Resample the y coordinates of `other` onto the x coordinates of this airfoil, surface by
    /// surface. Both airfoils are split at their own leading edges, and the lower and upper
    /// surfaces of `other` are linearly interpolated at the x positions of the matching surface
    /// of `self`. The result is aligned with the point order of `self`.
    ///
    /// The lower surface of `other` must be non-decreasing in x and its upper surface must be
    /// non-increasing in x. Some highly cambered NACA 4-digit profiles, such as the 8018, fold
    /// back slightly in x on the lower surface at the camber kink and are rejected as the
    /// source of an interpolation with `NonMonotonic`.
    pub fn interpolate_y_onto(&self, other: &Airfoil) -> Result<Vec<f64>> {
        let (lower, upper) = self.split();
        let (other_lower, other_upper) = other.split();
        trace!(
            lower = lower.len(),
            upper = upper.len(),
            other_lower = other_lower.len(),
            other_upper = other_upper.len(),
            "interpolating airfoil surfaces"
        );

        let lower_y = resample(&lower.x(), &other_lower, "lower")?;

        let upper_x = upper.reversed().x();
        let mut y = resample(&upper_x, &other_upper.reversed(), "upper")?;
        y.reverse();

        y.extend(lower_y);
        Ok(y)
    }

    /// Build a new airfoil on this airfoil's x coordinates. Arithmetic can overflow even with
    /// finite operands, so the new y values are held to the same finiteness rule as
    /// `from_points`.
    fn with_y(&self, y: &[f64]) -> Result<Airfoil> {
        if let Some(&v) = y.iter().find(|v| !v.is_finite()) {
            return Err(AirfoilError::InvalidParameter {
                name: "y",
                value: v,
            });
        }

        Ok(Airfoil {
            points: self
                .points
                .iter()
                .zip(y.iter())
                .map(|(p, &y)| Point2::new(p.x, y))
                .collect(),
            le: self.le,
        })
    }

    fn combine_y(&self, other: &Airfoil, f: impl Fn(f64, f64) -> f64) -> Result<Airfoil> {
        let other_y = self.interpolate_y_onto(other)?;
        let y: Vec<f64> = self
            .points
            .iter()
            .zip(other_y.iter())
            .map(|(p, &o)| f(p.y, o))
            .collect();
        self.with_y(&y)
    }

    /// Add the y coordinates of `other`, resampled onto the x coordinates of this airfoil.
    pub fn add(&self, other: &Airfoil) -> Result<Airfoil> {
        self.combine_y(other, |a, b| a + b)
    }

    /// Subtract the y coordinates of `other`, resampled onto the x coordinates of this airfoil.
    pub fn subtract(&self, other: &Airfoil) -> Result<Airfoil> {
        self.combine_y(other, |a, b| a - b)
    }

    /// Multiply the y coordinates by a finite scalar.
    pub fn scale(&self, factor: f64) -> Result<Airfoil> {
        if !factor.is_finite() {
            return Err(AirfoilError::UnsupportedOperation(
                "scaling by a non-finite value",
            ));
        }

        let y: Vec<f64> = self.points.iter().map(|p| p.y * factor).collect();
        self.with_y(&y)
    }

    /// Divide the y coordinates by a finite, non-zero scalar.
    pub fn divide(&self, divisor: f64) -> Result<Airfoil> {
        if !divisor.is_finite() {
            return Err(AirfoilError::UnsupportedOperation(
                "dividing by a non-finite value",
            ));
        }

        if divisor == 0.0 {
            return Err(AirfoilError::InvalidParameter {
                name: "divisor",
                value: divisor,
            });
        }

        let y: Vec<f64> = self.points.iter().map(|p| p.y / divisor).collect();
        self.with_y(&y)
    }

    /// Apply an arithmetic operation with an operand whose kind is only known at runtime.
    /// Addition and subtraction take another airfoil, multiplication and division take a scalar.
    pub fn apply(&self, op: ArithmeticOp, operand: Operand) -> Result<Airfoil> {
        match (op, operand) {
            (ArithmeticOp::Add, Operand::Airfoil(other)) => self.add(other),
            (ArithmeticOp::Subtract, Operand::Airfoil(other)) => self.subtract(other),
            (ArithmeticOp::Multiply, Operand::Scalar(k)) => self.scale(k),
            (ArithmeticOp::Divide, Operand::Scalar(k)) => self.divide(k),
            (ArithmeticOp::Multiply, Operand::Airfoil(_)) => Err(
                AirfoilError::UnsupportedOperation("multiplying an airfoil by an airfoil"),
            ),
            (ArithmeticOp::Divide, Operand::Airfoil(_)) => Err(
                AirfoilError::UnsupportedOperation("dividing an airfoil by an airfoil"),
            ),
            (ArithmeticOp::Multiply, Operand::Array(_)) => Err(
                AirfoilError::UnsupportedOperation("multiplying an airfoil by an array"),
            ),
            (ArithmeticOp::Divide, Operand::Array(_)) => Err(
                AirfoilError::UnsupportedOperation("dividing an airfoil by an array"),
            ),
            (op, operand) => Err(AirfoilError::TypeMismatch {
                op: op.symbol(),
                operand: operand.kind(),
            }),
        }
    }
}

fn resample(x: &[f64], source: &Surface, surface: &'static str) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Ok(Vec::new());
    }

    if source.is_empty() {
        return Err(AirfoilError::EmptySurface { surface });
    }

    let xp = source.x();
    if !is_ascending(&xp) {
        return Err(AirfoilError::NonMonotonic { surface });
    }

    Ok(interp(x, &xp, &source.y()))
}

impl<I: SliceIndex<[Point2<f64>]>> Index<I> for Airfoil {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Airfoil {
    type Item = &'a Point2<f64>;
    type IntoIter = std::slice::Iter<'a, Point2<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Add for &Airfoil {
    type Output = Result<Airfoil>;

    fn add(self, rhs: &Airfoil) -> Self::Output {
        Airfoil::add(self, rhs)
    }
}

impl Sub for &Airfoil {
    type Output = Result<Airfoil>;

    fn sub(self, rhs: &Airfoil) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Mul<f64> for &Airfoil {
    type Output = Result<Airfoil>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<f64> for &Airfoil {
    type Output = Result<Airfoil>;

    fn div(self, rhs: f64) -> Self::Output {
        self.divide(rhs)
    }
}

impl Mul for &Airfoil {
    type Output = Result<Airfoil>;

    fn mul(self, rhs: &Airfoil) -> Self::Output {
        self.apply(ArithmeticOp::Multiply, Operand::Airfoil(rhs))
    }
}

impl Div for &Airfoil {
    type Output = Result<Airfoil>;

    fn div(self, rhs: &Airfoil) -> Self::Output {
        self.apply(ArithmeticOp::Divide, Operand::Airfoil(rhs))
    }
}
