//! Text forecasts
//!
//! DMI publishes text forecasts with Danish keys; they are mapped verbatim.

use super::parse_timestamp;
use crate::entity;
use chrono::{DateTime, Utc};

entity! {
    /// Regional text forecast
    pub struct TextForecast {
        /// `titel`
        pub title: Option<String> => "titel",
        /// `tekst`
        pub text: Option<String> => "tekst",
        /// `udstedt`: issue time
        pub issued: Option<String> => "udstedt",
        /// `gyldig_fra`: start of validity
        pub valid_from: Option<String> => "gyldig_fra",
        /// `gyldig_til`: end of validity
        pub valid_to: Option<String> => "gyldig_til",
        /// `omr`: forecast area
        pub area: Option<String> => "omr",
    }
}

impl TextForecast {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued.as_deref().and_then(parse_timestamp)
    }

    /// Check whether the forecast is valid at `when`
    ///
    /// Forecasts without both bounds are never considered valid.
    pub fn is_valid_at(&self, when: DateTime<Utc>) -> bool {
        let from = self.valid_from.as_deref().and_then(parse_timestamp);
        let to = self.valid_to.as_deref().and_then(parse_timestamp);

        match (from, to) {
            (Some(from), Some(to)) => from <= when && when < to,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::hydration::{Entity, RawRecord};
    use serde_json::json;

    #[test]
    fn test_danish_keys_are_mapped() {
        let record = RawRecord::from_json(
            json!({
                "titel": "Udsigt for Hovedstadsområdet",
                "tekst": "Skyet, enkelte byger. Vestlig vind.",
                "udstedt": "2024-03-01T05:00:00Z",
                "gyldig_fra": "2024-03-01T06:00:00Z",
                "gyldig_til": "2024-03-02T06:00:00Z",
                "omr": "Hovedstadsområdet"
            }),
            8,
        )
        .unwrap();

        let hydrated = TextForecast::from_record(&record);
        let forecast = hydrated.entity;

        assert!(hydrated.report.is_clean());
        assert!(hydrated.report.unconsumed.is_empty());
        assert_eq!(forecast.area.as_deref(), Some("Hovedstadsområdet"));
        assert_eq!(
            forecast.issued_at(),
            "2024-03-01T05:00:00Z".parse::<DateTime<Utc>>().ok()
        );

        let noon = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert!(forecast.is_valid_at(noon));
        assert!(!TextForecast::default().is_valid_at(noon));
    }
}
