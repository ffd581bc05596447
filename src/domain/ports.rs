use crate::domain::model::{CountryTable, IndicatorRecord, Location};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn year(&self) -> i32;
    fn indicator(&self) -> &str;
    fn api_base(&self) -> &str;
    fn geocoder_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn output_path(&self) -> &str;
    fn zoom(&self) -> u8;
    fn csv_export(&self) -> bool;
}

/// Free-text place lookup, at most one best match. `Ok(None)` is a miss,
/// `Err` is a provider failure.
pub trait Geocoder: Send + Sync {
    fn lookup(
        &self,
        place: &str,
    ) -> impl std::future::Future<Output = Result<Option<Location>>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Vec<IndicatorRecord>>;
    async fn shape(&self, records: Vec<IndicatorRecord>) -> Result<CountryTable>;
    async fn geocode(&self, table: CountryTable) -> Result<CountryTable>;
    async fn render(&self, table: CountryTable) -> Result<String>;
}
