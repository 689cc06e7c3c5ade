//! Weather station metadata from the DMI metObs `collections/station` endpoint

use super::{Geometry, Point, parse_timestamp};
use crate::app::services::classifier::FeatureReader;
use crate::app::services::hydration::{Entity, Hydrated, Identifier, Number, RawRecord, Shared};
use crate::constants::station_status;
use crate::entity;
use chrono::{DateTime, Utc};

entity! {
    /// Station metadata
    ///
    /// A station appears once per validity period; `validFrom`/`validTo`
    /// bound the period this record describes.
    pub struct Station {
        /// Four or five digit DMI station id (e.g. "06180")
        pub station_id: String => "stationId",
        pub name: Option<String> => "name",
        pub country: Option<String> => "country",
        pub owner: Option<String> => "owner",
        /// "Active" or "Inactive"
        pub status: Option<String> => "status",
        /// Station type (e.g. "Synop", "Pluvio")
        pub station_type: Option<String> => "type",
        pub wmo_station_id: Option<Identifier> => "wmoStationId",
        pub wmo_country_code: Option<Identifier> => "wmoCountryCode",
        pub region_id: Option<Identifier> => "regionId",
        /// Parameter ids this station reports
        pub parameter_ids: Vec<String> => "parameterId",
        /// Height above sea level (m)
        pub station_height: Option<Number> => "stationHeight",
        pub barometer_height: Option<Number> => "barometerHeight",
        pub valid_from: Option<String> => "validFrom",
        pub valid_to: Option<String> => "validTo",
        pub operation_from: Option<String> => "operationFrom",
        pub operation_to: Option<String> => "operationTo",
        pub created: Option<String> => "created",
        pub updated: Option<String> => "updated",
        pub location: Option<Shared<Geometry>> => "geometry",
    }
}

impl Station {
    /// Hydrate a station from a GeoJSON feature
    pub fn from_feature(record: &RawRecord, reader: &FeatureReader) -> Hydrated<Self> {
        Self::from_record(&reader.read(record))
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(station_status::ACTIVE)
    }

    /// Check whether the station reports a parameter id
    pub fn measures(&self, parameter_id: &str) -> bool {
        self.parameter_ids.iter().any(|id| id == parameter_id)
    }

    /// Station position, when its geometry is a point
    pub fn point(&self) -> Option<&Point> {
        self.location
            .as_ref()
            .and_then(|location| location.downcast_ref::<Point>())
    }

    /// Check whether this record's validity period covers `when`
    ///
    /// A missing or unparsable `validTo` means the period is still open.
    pub fn is_valid_at(&self, when: DateTime<Utc>) -> bool {
        let starts = self.valid_from.as_deref().and_then(parse_timestamp);
        let ends = self.valid_to.as_deref().and_then(parse_timestamp);

        starts.is_none_or(|start| start <= when) && ends.is_none_or(|end| when < end)
    }
}
