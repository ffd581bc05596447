use clap::Parser;
use gdp_map::config::toml_config::TomlConfig;
use gdp_map::domain::ports::ConfigProvider;
use gdp_map::utils::{logger, validation::Validate};
use gdp_map::{GdpMapPipeline, LocalStorage, MapEngine, NominatimGeocoder};

#[derive(Parser)]
#[command(name = "toml-map")]
#[command(about = "GDP map generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "gdp-map.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the reporting year from the config file
    #[arg(long)]
    year: Option<i32>,

    /// Enable system monitoring
    #[arg(long)]
    monitor: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based map generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(year) = args.year {
        config.map.year = year;
        tracing::info!("🔧 Reporting year overridden to: {}", year);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲、地理編碼器和管道
    let storage = LocalStorage::new(config.output_path().to_string());
    let geocoder = NominatimGeocoder::new(
        config.geocoder_endpoint().to_string(),
        config.user_agent().to_string(),
    );
    let pipeline = GdpMapPipeline::new(storage, config, geocoder);

    // 創建引擎並運行
    let engine = MapEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Map generation completed successfully!");
            tracing::info!("📁 Map saved to: {}", output_path);
            println!("✅ Map generation completed successfully!");
            println!("📁 Map saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Map generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                gdp_map::utils::error::ErrorSeverity::Low => 0,
                gdp_map::utils::error::ErrorSeverity::Medium => 2,
                gdp_map::utils::error::ErrorSeverity::High => 1,
                gdp_map::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Year: {}", config.year());
    println!("  Indicator: {}", config.indicator());
    println!("  Statistics API: {}", config.api_base());
    println!("  Geocoder: {}", config.geocoder_endpoint());
    println!("  Output: {}", config.output_path());
    println!("  Zoom: {}", config.zoom());
    println!("  CSV export: {}", config.csv_export());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
