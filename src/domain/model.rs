use serde::{Deserialize, Serialize};

/// One country/value pair as reported by the statistics provider.
/// `value` is None when the provider has no figure for that country/year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub country: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "GDP_Per_Capita")]
    pub gdp_per_capita: Option<f64>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

impl CountryRow {
    /// Coordinates are written as a unit, so a row can never end up with
    /// exactly one of them set.
    pub fn set_location(&mut self, location: Option<Location>) {
        match location {
            Some(loc) => {
                self.latitude = Some(loc.latitude);
                self.longitude = Some(loc.longitude);
            }
            None => {
                self.latitude = None;
                self.longitude = None;
            }
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// The tabular stage output: ordered rows, moved by value from stage to stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    rows: Vec<CountryRow>,
}

impl CountryTable {
    /// Shape step: one row per record, input order preserved, coordinate
    /// columns left unpopulated.
    pub fn from_records(records: Vec<IndicatorRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| CountryRow {
                country: record.country,
                gdp_per_capita: record.value,
                latitude: None,
                longitude: None,
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [CountryRow] {
        &mut self.rows
    }

    /// Drop step: rows without coordinates are removed for good.
    pub fn drop_missing_coordinates(self) -> Self {
        let rows = self
            .rows
            .into_iter()
            .filter(CountryRow::has_coordinates)
            .collect();
        Self { rows }
    }

    /// Arithmetic mean of the populated coordinates. An empty table yields
    /// a NaN/NaN center, which the renderer writes out as-is.
    pub fn mean_center(&self) -> Location {
        let latitudes: Vec<f64> = self.rows.iter().filter_map(|r| r.latitude).collect();
        let longitudes: Vec<f64> = self.rows.iter().filter_map(|r| r.longitude).collect();

        Location {
            latitude: latitudes.iter().sum::<f64>() / latitudes.len() as f64,
            longitude: longitudes.iter().sum::<f64>() / longitudes.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, value: Option<f64>) -> IndicatorRecord {
        IndicatorRecord {
            country: country.to_string(),
            value,
        }
    }

    #[test]
    fn test_from_records_preserves_count_and_order() {
        let records = vec![
            record("France", Some(42000.0)),
            record("Japan", Some(34000.0)),
            record("Eritrea", None),
        ];

        let table = CountryTable::from_records(records);

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].country, "France");
        assert_eq!(table.rows()[0].gdp_per_capita, Some(42000.0));
        assert_eq!(table.rows()[1].country, "Japan");
        assert_eq!(table.rows()[2].country, "Eritrea");
        assert_eq!(table.rows()[2].gdp_per_capita, None);
        assert!(table.rows().iter().all(|r| !r.has_coordinates()));
    }

    #[test]
    fn test_set_location_writes_both_or_neither() {
        let mut table = CountryTable::from_records(vec![record("France", Some(42000.0))]);
        let row = &mut table.rows_mut()[0];

        row.set_location(Some(Location {
            latitude: 46.6,
            longitude: 2.2,
        }));
        assert_eq!(row.latitude, Some(46.6));
        assert_eq!(row.longitude, Some(2.2));

        row.set_location(None);
        assert_eq!(row.latitude, None);
        assert_eq!(row.longitude, None);
    }

    #[test]
    fn test_drop_missing_coordinates_keeps_only_resolved_rows() {
        let mut table = CountryTable::from_records(vec![
            record("France", Some(42000.0)),
            record("Unknown Region", Some(1000.0)),
            record("Japan", Some(34000.0)),
        ]);
        table.rows_mut()[0].set_location(Some(Location {
            latitude: 46.6,
            longitude: 2.2,
        }));
        table.rows_mut()[2].set_location(Some(Location {
            latitude: 36.5,
            longitude: 139.2,
        }));

        let before = table.len();
        let table = table.drop_missing_coordinates();

        assert!(table.len() <= before);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].country, "France");
        assert_eq!(table.rows()[1].country, "Japan");
        assert!(table.rows().iter().all(CountryRow::has_coordinates));
    }

    #[test]
    fn test_mean_center_is_arithmetic_mean() {
        let mut table = CountryTable::from_records(vec![
            record("A", Some(1.0)),
            record("B", Some(2.0)),
        ]);
        table.rows_mut()[0].set_location(Some(Location {
            latitude: 10.0,
            longitude: 20.0,
        }));
        table.rows_mut()[1].set_location(Some(Location {
            latitude: 30.0,
            longitude: -40.0,
        }));

        let center = table.mean_center();
        assert!((center.latitude - 20.0).abs() < 1e-9);
        assert!((center.longitude - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_mean_center_of_empty_table_is_nan() {
        let table = CountryTable::default();
        let center = table.mean_center();
        assert!(center.latitude.is_nan());
        assert!(center.longitude.is_nan());
    }
}
