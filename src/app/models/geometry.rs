//! GeoJSON geometries
//!
//! DMI features carry a `geometry` mapping. The feature reader resolves it
//! into one of these entities through [`geometry_table`], keyed by the
//! GeoJSON `type`.

use super::Geometry;
use crate::Result;
use crate::app::services::classifier::ClassificationTable;
use crate::app::services::hydration::Number;
use crate::constants::{GEOMETRY_TYPE_KEY, geometry_types};
use crate::entity;

entity! {
    /// GeoJSON point with `[longitude, latitude]` coordinates
    pub struct Point implements [Geometry] {
        pub kind: String => "type",
        pub coordinates: Vec<Number> => "coordinates",
    }
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: geometry_types::POINT.to_string(),
            coordinates: vec![Number::Float(longitude), Number::Float(latitude)],
        }
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().map(Number::as_f64)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).map(Number::as_f64)
    }
}

entity! {
    /// GeoJSON polygon: a list of linear rings, exterior ring first
    pub struct Polygon implements [Geometry] {
        pub kind: String => "type",
        pub coordinates: Vec<Vec<Vec<Number>>> => "coordinates",
    }
}

impl Polygon {
    /// The exterior ring, if any
    pub fn exterior(&self) -> Option<&[Vec<Number>]> {
        self.coordinates.first().map(Vec::as_slice)
    }

    /// `(min_lon, min_lat, max_lon, max_lat)` of the exterior ring
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let ring = self.exterior()?;
        let mut positions = ring.iter().filter_map(|position| {
            Some((position.first()?.as_f64(), position.get(1)?.as_f64()))
        });

        let (lon, lat) = positions.next()?;
        Some(positions.fold(
            (lon, lat, lon, lat),
            |(min_lon, min_lat, max_lon, max_lat), (lon, lat)| {
                (
                    min_lon.min(lon),
                    min_lat.min(lat),
                    max_lon.max(lon),
                    max_lat.max(lat),
                )
            },
        ))
    }
}

/// Table routing a GeoJSON geometry `type` to its entity
pub fn geometry_table() -> Result<ClassificationTable> {
    ClassificationTable::builder(GEOMETRY_TYPE_KEY)
        .route::<Point>(&[geometry_types::POINT])
        .route::<Polygon>(&[geometry_types::POLYGON])
        .build()
}
