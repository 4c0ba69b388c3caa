use crate::airfoil::Airfoil;
use crate::errors::AirfoilError;
use serde::{Deserialize, Serialize};

/// The serialized form of an airfoil, with the coordinates stored as two parallel rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirfoilRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl From<Airfoil> for AirfoilRecord {
    fn from(airfoil: Airfoil) -> Self {
        AirfoilRecord {
            x: airfoil.x(),
            y: airfoil.y(),
        }
    }
}

impl TryFrom<AirfoilRecord> for Airfoil {
    type Error = AirfoilError;

    fn try_from(record: AirfoilRecord) -> Result<Self, Self::Error> {
        Airfoil::from_xy(&record.x, &record.y)
    }
}
