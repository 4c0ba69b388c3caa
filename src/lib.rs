//! Generation and arithmetic of 2D airfoil sections.
//!
//! An [`Airfoil`](airfoil::Airfoil) is an ordered loop of boundary points. Profiles of the NACA
//! 4-digit family can be generated with [`generate_naca4`](airfoil::generate::generate_naca4),
//! and two airfoils with different point distributions can be added or subtracted, with the
//! right hand side resampled onto the x coordinates of the left.

pub mod airfoil;
pub mod algorithms;
pub mod errors;
pub mod serialize;

pub use airfoil::generate::{generate_naca4, Naca4Profile, SamplingParams, Spacing};
pub use airfoil::{Airfoil, ArithmeticOp, Operand, Surface};
pub use errors::{AirfoilError, Result};
