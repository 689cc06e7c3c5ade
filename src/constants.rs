//! Application constants for DMI processor
//!
//! This module contains record keys, default values and the parameter id
//! lists used to build the default classification tables.

// =============================================================================
// Record Keys
// =============================================================================

/// Key holding the parameter id that decides an observation's entity type
pub const PARAMETER_ID_KEY: &str = "parameterId";

/// Key holding the station identifier used for grouping
pub const STATION_ID_KEY: &str = "stationId";

/// Key holding the observation timestamp (RFC 3339)
pub const OBSERVED_KEY: &str = "observed";

/// Key holding an observation's measured value
pub const VALUE_KEY: &str = "value";

/// GeoJSON feature key holding the record's own fields
pub const PROPERTIES_KEY: &str = "properties";

/// GeoJSON feature key holding the record's geometry
pub const GEOMETRY_KEY: &str = "geometry";

/// GeoJSON key naming a geometry's shape
pub const GEOMETRY_TYPE_KEY: &str = "type";

/// GeoJSON feature collection key holding the features array
pub const FEATURES_KEY: &str = "features";

/// Group key used for entities that carry no station identifier
pub const NO_STATION: &str = "";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Deepest nesting accepted in a single raw record
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Default log level when no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Extension of input files picked up when a directory is given
pub const INPUT_FILE_EXTENSION: &str = "json";

// =============================================================================
// DMI metObs Parameter Ids
// =============================================================================

/// Parameter ids published by the DMI metObs API, grouped by entity type
///
/// Every id listed here routes to exactly one entity type; ids not listed are
/// dropped by the classifier and counted in its statistics.
pub mod parameters {
    /// Air, dew point, grass and soil temperatures (°C)
    pub const TEMPERATURE: &[&str] = &[
        "temp_dry",
        "temp_dew",
        "temp_max_past1h",
        "temp_max_past12h",
        "temp_mean_past1h",
        "temp_min_past1h",
        "temp_min_past12h",
        "temp_grass",
        "temp_grass_max_past1h",
        "temp_grass_mean_past1h",
        "temp_grass_min_past1h",
        "temp_soil",
        "temp_soil_max_past1h",
        "temp_soil_mean_past1h",
        "temp_soil_min_past1h",
    ];

    /// Relative humidity (%)
    pub const HUMIDITY: &[&str] = &["humidity", "humidity_past1h"];

    /// Station and sea level pressure (hPa)
    pub const PRESSURE: &[&str] = &["pressure", "pressure_at_sea"];

    /// Wind direction (degrees) and speeds (m/s)
    pub const WIND: &[&str] = &[
        "wind_dir",
        "wind_dir_past1h",
        "wind_gust_always_past1h",
        "wind_max",
        "wind_max_per10min_past1h",
        "wind_min",
        "wind_min_past1h",
        "wind_speed",
        "wind_speed_past1h",
    ];

    /// Accumulated precipitation (mm) and duration (minutes)
    pub const PRECIPITATION: &[&str] = &[
        "precip_past1min",
        "precip_past10min",
        "precip_past1h",
        "precip_past24h",
        "precip_dur_past10min",
        "precip_dur_past1h",
    ];

    /// Bright sunshine duration (minutes)
    pub const SUNSHINE: &[&str] = &["sun_last10min_glob", "sun_last1h_glob"];

    /// Global radiation (W/m²)
    pub const RADIATION: &[&str] = &["radia_glob", "radia_glob_past1h"];

    /// Horizontal visibility (m)
    pub const VISIBILITY: &[&str] = &["visibility", "visib_mean_last10min"];

    /// Cloud cover (%) and cloud base height (m)
    pub const CLOUD: &[&str] = &["cloud_cover", "cloud_height"];

    /// Manually observed snow depth (cm) and cover
    pub const SNOW: &[&str] = &["snow_depth_man", "snow_cover_man"];

    /// Present weather code
    pub const WEATHER: &[&str] = &["weather"];

    /// Leaf moisture duration (minutes)
    pub const LEAF_MOISTURE: &[&str] = &["leav_hum_dur_past10min", "leav_hum_dur_past1h"];
}

/// GeoJSON geometry type names handled by the geometry table
pub mod geometry_types {
    pub const POINT: &str = "Point";
    pub const POLYGON: &str = "Polygon";
}

/// Station status values as published by DMI
pub mod station_status {
    pub const ACTIVE: &str = "Active";
    pub const INACTIVE: &str = "Inactive";
}
