use crate::airfoil::Airfoil;
use crate::errors::{AirfoilError, Result};
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use tracing::debug;

/// Substituted for a camber position of zero so the front camber segment never divides by zero
const ZERO_CAMBER_POSITION: f64 = 0.1;

/// Default number of boundary points on a generated profile
pub const DEFAULT_POINTS: usize = 299;

/// The distribution of samples along the chord
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Samples are evenly spaced in the angle beta over [0, pi] and mapped to the chord with
    /// `(1 - cos(beta)) / 2`, concentrating points at the leading and trailing edges
    Cosine,

    /// Samples are evenly spaced along the chord
    Linear,
}

impl Spacing {
    fn extent(&self) -> f64 {
        match self {
            Spacing::Cosine => PI,
            Spacing::Linear => 1.0,
        }
    }

    fn chord_fraction(&self, beta: f64) -> f64 {
        match self {
            Spacing::Cosine => (1.0 - beta.cos()) / 2.0,
            Spacing::Linear => beta,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Cosine
    }
}

/// Controls how many boundary points a generator produces and how they are distributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    pub num_points: usize,
    pub spacing: Spacing,
}

impl SamplingParams {
    pub fn new(num_points: usize, spacing: Spacing) -> Self {
        SamplingParams {
            num_points,
            spacing,
        }
    }

    pub fn with_points(num_points: usize) -> Self {
        Self::new(num_points, Spacing::default())
    }

    /// Produces the chord fractions of the upper surface samples, starting at the leading edge,
    /// and of the lower surface samples, which skip the leading edge. An odd point count is
    /// split evenly after the shared leading edge, an even count gives the upper surface one
    /// extra point.
    fn chord_fractions(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.num_points;
        let (upper_count, lower_count) = if n % 2 == 1 {
            (n / 2 + 1, n / 2 + 1)
        } else {
            (n / 2 + 1, n / 2)
        };

        let end = self.spacing.extent();
        let to_chord = |b: f64| self.spacing.chord_fraction(b);
        let upper = linspace(end, upper_count).into_iter().map(to_chord).collect();
        let lower = linspace(end, lower_count)
            .into_iter()
            .skip(1)
            .map(to_chord)
            .collect();

        (upper, lower)
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        SamplingParams::new(DEFAULT_POINTS, Spacing::Cosine)
    }
}

fn linspace(end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..count)
            .map(|i| end * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Everything a generator places at one chord fraction: the point on the mean camber line and
/// the two surface points offset from it along the camber line normal
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChordStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

/// A ProfileGenerator is an entity which can evaluate the height and slope of the mean camber
/// line and the half thickness of an airfoil at fractions of the chord. This provides the
/// information necessary to place the upper and lower surface points.
pub trait ProfileGenerator {
    /// Return the camber line height and the angle of its slope (radians) at a chord fraction
    /// from 0.0 to 1.0
    fn camber(&self, xc: f64) -> (f64, f64);

    /// Return the half thickness of the airfoil, measured normal to the camber line, at a chord
    /// fraction from 0.0 to 1.0
    fn half_thickness(&self, xc: f64) -> f64;

    fn station_at(&self, xc: f64) -> ChordStation {
        let (yc, theta) = self.camber(xc);
        let yt = self.half_thickness(xc);
        let (sin, cos) = theta.sin_cos();

        ChordStation {
            camber: Point2::new(xc, yc),
            upper: Point2::new(xc - yt * sin, yc + yt * cos),
            lower: Point2::new(xc + yt * sin, yc - yt * cos),
        }
    }

    /// Generates the closed boundary of the profile. The points run along the upper surface from
    /// the trailing edge to the leading edge, then along the lower surface back to the trailing
    /// edge.
    fn generate(&self, params: &SamplingParams) -> Result<Vec<Point2<f64>>> {
        if params.num_points < 2 {
            return Err(AirfoilError::InvalidParameter {
                name: "num_points",
                value: params.num_points as f64,
            });
        }

        let (upper, lower) = params.chord_fractions();
        debug!(
            upper = upper.len(),
            lower = lower.len(),
            spacing = ?params.spacing,
            "generating profile"
        );

        let mut points: Vec<Point2<f64>> = upper
            .iter()
            .rev()
            .map(|&xc| self.station_at(xc).upper)
            .collect();
        points.extend(lower.iter().map(|&xc| self.station_at(xc).lower));

        Ok(points)
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AirfoilError::InvalidParameter { name, value })
    }
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
#[derive(Debug, Clone, PartialEq)]
pub struct Naca4Digit {
    m: f64,
    p: f64,
    t: f64,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator on a unit chord.
    ///
    /// # Arguments
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4. A value of zero is replaced by 0.1.
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// All three values must lie in [0, 1).
    pub fn new(max_camber: f64, max_camber_chord: f64, t_max: f64) -> Result<Naca4Digit> {
        let m = check_fraction("max_camber", max_camber)?;
        let p = check_fraction("max_camber_chord", max_camber_chord)?;
        let t = check_fraction("t_max", t_max)?;

        Ok(Naca4Digit {
            m,
            p: if p == 0.0 { ZERO_CAMBER_POSITION } else { p },
            t,
        })
    }
}

impl ProfileGenerator for Naca4Digit {
    fn camber(&self, xc: f64) -> (f64, f64) {
        let (m, p) = (self.m, self.p);
        let (yc, dyc) = if xc < p {
            (
                m / p.powi(2) * (2.0 * p * xc - xc.powi(2)),
                2.0 * m / p.powi(2) * (p - xc),
            )
        } else {
            (
                m / (1.0 - p).powi(2) * (1.0 - 2.0 * p + 2.0 * p * xc - xc.powi(2)),
                2.0 * m / (1.0 - p).powi(2) * (p - xc),
            )
        };

        (yc, dyc.atan())
    }

    fn half_thickness(&self, xc: f64) -> f64 {
        self.t / 0.2
            * (0.2969 * xc.sqrt() - 0.1260 * xc - 0.3516 * xc.powi(2) + 0.2843 * xc.powi(3)
                - 0.1036 * xc.powi(4))
    }
}

/// Parse a NACA 4-digit designation such as "2412" or "NACA 0012" into the maximum camber
/// (percent chord), the location of maximum camber (tenths of chord) and the maximum thickness
/// (percent chord).
pub fn parse_designation(text: &str) -> Result<(f64, f64, f64)> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let upper = compact.to_ascii_uppercase();
    let digits = upper.strip_prefix("NACA").unwrap_or(&upper);

    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AirfoilError::InvalidDesignation(text.to_string()));
    }

    let value = |s: &str| {
        s.parse::<u32>()
            .map(f64::from)
            .map_err(|_| AirfoilError::InvalidDesignation(text.to_string()))
    };

    Ok((value(&digits[0..1])?, value(&digits[1..2])?, value(&digits[2..4])?))
}

/// An airfoil generated from the NACA 4-digit family, keeping the parameters it was generated
/// from. The parameters are informational only, arithmetic on the profile works on the
/// underlying `Airfoil` through `Deref`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Naca4Profile {
    /// Maximum camber in percent of chord
    pub max_camber: f64,

    /// Location of maximum camber in tenths of chord
    pub camber_position: f64,

    /// Maximum thickness in percent of chord
    pub thickness: f64,

    pub num_points: usize,
    airfoil: Airfoil,
}

impl Naca4Profile {
    pub fn new(
        max_camber: f64,
        camber_position: f64,
        thickness: f64,
        params: &SamplingParams,
    ) -> Result<Naca4Profile> {
        let generator = Naca4Digit::new(
            max_camber / 100.0,
            camber_position / 10.0,
            thickness / 100.0,
        )?;
        let airfoil = Airfoil::from_points(generator.generate(params)?)?;
        debug!(
            max_camber,
            camber_position,
            thickness,
            num_points = params.num_points,
            leading_edge = airfoil.leading_edge_index(),
            "generated NACA 4-digit profile"
        );

        Ok(Naca4Profile {
            max_camber,
            camber_position,
            thickness,
            num_points: params.num_points,
            airfoil,
        })
    }

    pub fn from_designation(text: &str, params: &SamplingParams) -> Result<Naca4Profile> {
        let (m, p, t) = parse_designation(text)?;
        Naca4Profile::new(m, p, t, params)
    }

    /// The four digit name of the profile, for example "NACA 2412"
    pub fn designation(&self) -> String {
        format!(
            "NACA {}{}{:02}",
            self.max_camber.round(),
            self.camber_position.round(),
            self.thickness.round()
        )
    }

    pub fn airfoil(&self) -> &Airfoil {
        &self.airfoil
    }

    pub fn into_airfoil(self) -> Airfoil {
        self.airfoil
    }
}

impl Deref for Naca4Profile {
    type Target = Airfoil;

    fn deref(&self) -> &Self::Target {
        &self.airfoil
    }
}

impl Display for Naca4Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Naca4Profile({}, {}, {})",
            self.max_camber, self.camber_position, self.thickness
        )
    }
}

/// Generate a NACA 4-digit airfoil with cosine spacing.
///
/// # Arguments
///
/// * `max_camber` - maximum camber in percent of chord, the first digit
/// * `camber_position` - location of maximum camber in tenths of chord, the second digit
/// * `thickness` - maximum thickness in percent of chord, the last two digits
/// * `num_points` - total number of boundary points, at least 2
///
/// Strongly cambered, thick profiles with the maximum camber far forward (for example the 8018
/// or 5030) have a lower surface which folds back slightly in x where the two camber segments
/// meet. They generate normally but cannot be the right hand side of `Airfoil::add` or
/// `Airfoil::subtract`, which fail with `NonMonotonic`.
pub fn generate_naca4(
    max_camber: f64,
    camber_position: f64,
    thickness: f64,
    num_points: usize,
) -> Result<Airfoil> {
    let params = SamplingParams::with_points(num_points);
    Naca4Profile::new(max_camber, camber_position, thickness, &params).map(|p| p.into_airfoil())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(1.000000, 0.000000)]
    #[test_case(0.840000, 0.021066)]
    #[test_case(0.680000, 0.038287)]
    #[test_case(0.520000, 0.051543)]
    #[test_case(0.360000, 0.059242)]
    #[test_case(0.200000, 0.057373)]
    #[test_case(0.040000, 0.032277)]
    fn test_naca_4_thickness(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.0, 0.0, 0.12).unwrap();
        let result = naca.half_thickness(x);
        assert_relative_eq!(e, result, epsilon = 1e-6);
    }

    #[test_case(1.0000, 0.0000)]
    #[test_case(0.9000, 0.0198)]
    #[test_case(0.7000, 0.0513)]
    #[test_case(0.5000, 0.0723)]
    #[test_case(0.3000, 0.0788)]
    #[test_case(0.2000, 0.0724)]
    #[test_case(0.1000, 0.0556)]
    fn test_naca_4_camber(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.02, 0.4, 0.12).unwrap();
        let (yc, _) = naca.camber(x);
        assert_relative_eq!(e, naca.half_thickness(x) + yc, epsilon = 1e-4);
    }

    #[test]
    fn test_camber_peaks_at_position() {
        let naca = Naca4Digit::new(0.02, 0.4, 0.12).unwrap();
        let (yc, theta) = naca.camber(0.4);
        assert_relative_eq!(0.02, yc, epsilon = 1e-12);
        assert_relative_eq!(0.0, theta, epsilon = 1e-12);
    }

    #[test]
    fn test_station_surfaces_straddle_camber_line() {
        let naca = Naca4Digit::new(0.02, 0.4, 0.12).unwrap();
        let station = naca.station_at(0.2);
        let mid = (station.upper.coords + station.lower.coords) / 2.0;

        assert_relative_eq!(station.camber.x, mid.x, epsilon = 1e-12);
        assert_relative_eq!(station.camber.y, mid.y, epsilon = 1e-12);
        assert_relative_eq!(
            2.0 * naca.half_thickness(0.2),
            (station.upper - station.lower).norm(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_camber_position_is_replaced() {
        let naca = Naca4Digit::new(0.02, 0.0, 0.12).unwrap();
        let (yc, _) = naca.camber(ZERO_CAMBER_POSITION);
        assert_relative_eq!(0.02, yc, epsilon = 1e-12);
    }

    #[test_case(-0.01, 0.4, 0.12, "max_camber")]
    #[test_case(0.02, 1.0, 0.12, "max_camber_chord")]
    #[test_case(0.02, 0.4, 1.5, "t_max")]
    #[test_case(f64::NAN, 0.4, 0.12, "max_camber")]
    fn test_invalid_fractions(m: f64, p: f64, t: f64, name: &str) {
        match Naca4Digit::new(m, p, t) {
            Err(AirfoilError::InvalidParameter { name: n, .. }) => assert_eq!(name, n),
            _ => panic!("expected an invalid parameter"),
        }
    }

    #[test_case(0)]
    #[test_case(1)]
    fn test_too_few_points(n: usize) {
        let result = generate_naca4(2.0, 4.0, 12.0, n);
        assert!(matches!(
            result,
            Err(AirfoilError::InvalidParameter {
                name: "num_points",
                ..
            })
        ));
    }

    #[test]
    fn test_point_count_matches_request() {
        for spacing in [Spacing::Cosine, Spacing::Linear] {
            for n in 2..80 {
                let params = SamplingParams::new(n, spacing);
                let profile = Naca4Profile::new(2.0, 4.0, 12.0, &params).unwrap();
                assert_eq!(n, profile.len());
                assert_eq!(n, profile.num_points);
            }
        }
    }

    #[test_case(7, 4, 3)]
    #[test_case(8, 5, 3)]
    #[test_case(2, 2, 0)]
    #[test_case(3, 2, 1)]
    fn test_surface_budget(n: usize, upper: usize, lower: usize) {
        let (u, l) = SamplingParams::with_points(n).chord_fractions();
        assert_eq!(upper, u.len());
        assert_eq!(lower, l.len());
        assert_relative_eq!(0.0, u[0]);
        assert_relative_eq!(1.0, *u.last().unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_leading_edge_is_minimum_x() {
        let airfoil = generate_naca4(2.0, 4.0, 12.0, 299).unwrap();
        let min_x = airfoil.x().into_iter().fold(f64::MAX, f64::min);
        assert_relative_eq!(min_x, airfoil.leading_edge().x);
    }

    #[test]
    fn test_naca_2412_eleven_points() {
        let airfoil = generate_naca4(2.0, 4.0, 12.0, 11).unwrap();

        assert_eq!(11, airfoil.len());
        for p in airfoil.iter() {
            assert!(p.x > -1e-3 && p.x < 1.0 + 1e-3, "x out of range: {}", p.x);
        }
        assert_eq!(5, airfoil.leading_edge_index());
        assert_relative_eq!(0.0, airfoil.leading_edge().x, epsilon = 1e-12);
        assert_relative_eq!(0.0, airfoil.leading_edge().y, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_closes_at_trailing_edge() {
        let airfoil = generate_naca4(2.0, 4.0, 12.0, 101).unwrap();
        let first = airfoil[0];
        let last = airfoil[airfoil.len() - 1];
        assert_relative_eq!(1.0, first.x, epsilon = 1e-9);
        assert_relative_eq!(1.0, last.x, epsilon = 1e-9);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-9);
    }

    #[test_case(0.0)]
    #[test_case(2.0)]
    #[test_case(4.0)]
    #[test_case(7.0)]
    fn test_symmetric_surfaces_mirror(p: f64) {
        let airfoil = generate_naca4(0.0, p, 12.0, 51).unwrap();
        let le = airfoil.leading_edge_index();
        assert_eq!(25, le);

        for i in 1..=le {
            let upper = airfoil[le - i];
            let lower = airfoil[le + i];
            assert_relative_eq!(upper.x, lower.x, epsilon = 1e-12);
            assert_relative_eq!(upper.y, -lower.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_linear_spacing_is_even_on_symmetric() {
        let params = SamplingParams::new(11, Spacing::Linear);
        let profile = Naca4Profile::new(0.0, 0.0, 12.0, &params).unwrap();
        let (lower, _) = profile.split();
        for (i, x) in lower.x().iter().enumerate() {
            assert_relative_eq!(i as f64 * 0.2, *x, epsilon = 1e-12);
        }
    }

    #[test_case("2412", (2.0, 4.0, 12.0))]
    #[test_case("NACA 0012", (0.0, 0.0, 12.0))]
    #[test_case("naca6409", (6.0, 4.0, 9.0))]
    fn test_parse_designation(text: &str, e: (f64, f64, f64)) {
        assert_eq!(e, parse_designation(text).unwrap());
    }

    #[test_case("241")]
    #[test_case("24a2")]
    #[test_case("NACA 23012")]
    #[test_case("")]
    fn test_parse_bad_designation(text: &str) {
        assert_eq!(
            Err(AirfoilError::InvalidDesignation(text.to_string())),
            parse_designation(text)
        );
    }

    #[test]
    fn test_profile_display_and_designation() {
        let profile = Naca4Profile::from_designation("0012", &SamplingParams::default()).unwrap();
        assert_eq!("NACA 0012", profile.designation());
        assert_eq!("Naca4Profile(0, 0, 12)", profile.to_string());
        assert_eq!(DEFAULT_POINTS, profile.len());
    }

    #[test]
    fn test_sampling_params_from_partial_json() {
        let params: SamplingParams = serde_json::from_str(r#"{"spacing": "linear"}"#).unwrap();
        assert_eq!(SamplingParams::new(DEFAULT_POINTS, Spacing::Linear), params);
    }
}
