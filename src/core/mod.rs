pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{CountryRow, CountryTable, IndicatorRecord, Location};
pub use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, Storage};
pub use crate::utils::error::Result;
