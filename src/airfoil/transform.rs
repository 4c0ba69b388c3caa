//! Rigid body transformation of whole airfoils.
//!
//! No transformation is built in yet. The `Transform` trait describes the capability so that
//! callers can supply their own implementation, every method of which must return a new
//! `Airfoil` and leave its input untouched.

use crate::airfoil::Airfoil;
use crate::errors::Result;
use ncollide2d::na::Vector2;

pub trait Transform {
    /// Move every point of the airfoil by `offset`
    fn translate(&self, airfoil: &Airfoil, offset: &Vector2<f64>) -> Result<Airfoil>;

    /// Rotate the airfoil by `angle` radians about the origin
    fn rotate(&self, airfoil: &Airfoil, angle: f64) -> Result<Airfoil>;

    /// Scale the airfoil uniformly about the origin
    fn scale(&self, airfoil: &Airfoil, factor: f64) -> Result<Airfoil>;
}
