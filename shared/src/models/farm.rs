//! Farm parcel models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// A farm parcel with its reference geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub centroid: Option<GpsCoordinates>,
    /// GeoJSON geometry of the parcel boundary; opaque to the simulation
    pub boundary: Option<serde_json::Value>,
}
