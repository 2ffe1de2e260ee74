use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meteo_temp_tracker::config::Config;
use meteo_temp_tracker::exporters::CsvExporter;
use meteo_temp_tracker::fetcher::ObservationFetcher;
use meteo_temp_tracker::importers::ExcelReader;
use meteo_temp_tracker::intervals::build_intervals;
use meteo_temp_tracker::pipeline::run_pipeline;
use meteo_temp_tracker::station_locator::StationLocator;

#[derive(Parser)]
#[command(name = "meteo-temp-tracker")]
#[command(about = "Compute min/max temperatures per date range from scraped hourly observations", long_about = None)]
struct Cli {
    /// Path to the input workbook of dated rows
    #[arg(long, env = "INPUT_PATH", default_value = "assets/InputData.xlsx")]
    input: PathBuf,

    /// Sheet holding the dated rows
    #[arg(long, env = "SHEET_NAME", default_value = "Suivi Conso New")]
    sheet: String,

    /// Zero-based row of the column headers in the input sheet
    #[arg(long, env = "HEADER_ROW", default_value = "2")]
    header_row: usize,

    /// Numeric station ID; skips the name lookup when set
    #[arg(long, env = "STATION_ID")]
    station_id: Option<String>,

    /// Station name, resolved once at startup
    #[arg(long, env = "STATION_NAME", default_value = "Bressuire")]
    station_name: String,

    /// Path of the output table
    #[arg(long, env = "OUTPUT_PATH", default_value = "assets/OutputData.csv")]
    output: PathBuf,

    /// Base URL of the observation site
    #[arg(long, env = "METEOCIEL_BASE_URL", default_value = "https://www.meteociel.fr")]
    base_url: String,

    /// chrono format of the input Date column
    #[arg(long, env = "INPUT_DATE_FORMAT", default_value = "%d/%m/%y %H:%M")]
    input_date_format: String,

    /// chrono format for dates in the output table
    #[arg(long, env = "OUTPUT_DATE_FORMAT", default_value = "%d/%m/%Y %H:%M")]
    output_date_format: String,

    /// Render output temperatures with a decimal comma
    #[arg(long, env = "DECIMAL_COMMA", default_value_t = true, action = clap::ArgAction::Set)]
    decimal_comma: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            input_path: self.input,
            sheet_name: self.sheet,
            header_row: self.header_row,
            station_id: self.station_id,
            station_name: self.station_name,
            output_path: self.output,
            base_url: self.base_url,
            input_date_format: self.input_date_format,
            output_date_format: self.output_date_format,
            decimal_comma: self.decimal_comma,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,meteo_temp_tracker=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Cli::parse().into_config();
    info!("Starting temperature tracker with config: {:?}", config);

    let start_time = Instant::now();

    // Resolve the station once per run
    let station_id = match &config.station_id {
        Some(id) => id.clone(),
        None => {
            let locator = StationLocator::with_base_url(config.base_url.clone());
            locator.find_station_id(&config.station_name).await?
        }
    };
    info!("Using station ID {}", station_id);

    // Read the input sheet (blocking I/O off the runtime)
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Parsing {}...", config.input_path.display()));

    let input_path = config.input_path.to_string_lossy().to_string();
    let sheet_name = config.sheet_name.clone();
    let header_row = config.header_row;
    let date_format = config.input_date_format.clone();
    let rows = tokio::task::spawn_blocking(move || {
        let reader = ExcelReader::new(&input_path);
        reader.read_rows(&sheet_name, header_row, &date_format)
    })
    .await??;

    pb.finish_with_message(format!("✓ Read {} dated rows", rows.len()));

    let intervals = build_intervals(&rows, &config.input_date_format);
    info!("Built {} intervals from {} rows", intervals.len(), rows.len());

    // Fetch and aggregate, one interval at a time
    let fetcher = ObservationFetcher::with_base_url(config.base_url.clone());
    let results = run_pipeline(&fetcher, &station_id, &intervals).await;

    let exporter = CsvExporter::new(
        config.output_path.to_string_lossy(),
        &config.output_date_format,
        config.decimal_comma,
    );
    exporter.export(&results)?;

    let total_duration = start_time.elapsed();
    let skipped = intervals.len() - results.len();

    println!("\n{}", "=".repeat(60));
    println!("Run Summary");
    println!("{}", "=".repeat(60));
    println!("Station ID:         {station_id}");
    println!("Input Rows:         {}", rows.len());
    println!("Intervals:          {}", intervals.len());
    println!("Rows Written:       {}", results.len());
    println!("Skipped Intervals:  {skipped}");
    println!("Output:             {}", config.output_path.display());
    println!("{}", "-".repeat(60));
    println!("Total Time:         {:.2}s", total_duration.as_secs_f64());
    println!("{}", "=".repeat(60));

    Ok(())
}
