use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MapEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting map pipeline...");

        // Fetch
        println!("Fetching indicator data...");
        let records = self.pipeline.fetch().await?;
        println!("Fetched {} records", records.len());
        self.monitor.log_stats("Fetch");

        // Shape
        println!("Shaping data...");
        let table = self.pipeline.shape(records).await?;
        println!("Shaped {} rows", table.len());
        self.monitor.log_stats("Shape");

        // Geocode, then drop the rows no location was found for
        println!("Geocoding countries...");
        let table = self.pipeline.geocode(table).await?;
        let total = table.len();
        let table = table.drop_missing_coordinates();
        println!("Geocoded {} of {} countries", table.len(), total);
        self.monitor.log_stats("Geocode");

        // Render
        println!("Rendering map...");
        let output_path = self.pipeline.render(table).await?;
        println!("Map saved to: {}", output_path);
        self.monitor.log_stats("Render");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
