use chrono::Local;
use scrap::{info_time, process::process_site, Result, ScrapeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = ScrapeConfig::default();
    let rows = process_site(&config).await?;
    info_time!(
        start_time,
        "Saved {} rows to {}",
        rows,
        config.output_path.display()
    );

    Ok(())
}
