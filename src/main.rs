use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), azprobe::error::Error>
{   env_logger::init();

    let config = azprobe::ProbeConfig::from_env().map_err(|e| {
      error!("Could not load probe configuration: {}", e);
      eprintln!("❌ Configuration error: {}", e);
      eprintln!(
        "Set AZURE_API_KEY, AZURE_ENDPOINT_URL and AZURE_MODEL \
         (a .env file in the working directory works too)."
      );
      e
    })?;

    // A failed probe still exits 0; the printed report is the result.
    let ok = azprobe::probe(&config).await;
    info!("Probe finished, success = {}", ok);
    Ok(())
}
