use clap::Parser;
use salon_enrich::core::report::phone_listing;
use salon_enrich::utils::{logger, validation::Validate};
use salon_enrich::{
    AppError, CliConfig, EnrichmentEngine, EnrichmentPipeline, FixedDelay, LocalStorage,
    SerpApiLookup,
};

fn fail(e: &AppError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("\n❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    println!("{}", "=".repeat(60));
    println!("YTJ - hairdresser and barber contact lookup");
    println!("{}", "=".repeat(60));

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    if cli.verbose {
        tracing::debug!("Input: {}, output dir: {}", config.input.path, config.output.dir);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(&e);
    }

    let lookup = match SerpApiLookup::new(config.lookup.clone()) {
        Ok(lookup) => lookup,
        Err(e) => fail(&e),
    };
    let pacer = FixedDelay::new(config.pacing.delay());
    let storage = LocalStorage::new(config.output.dir.clone());
    let pipeline = EnrichmentPipeline::new(config, lookup, pacer, storage);

    let engine = EnrichmentEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            println!("\n{}", "=".repeat(60));
            println!("SAVED: {}", report.output_path);
            println!("{}", "=".repeat(60));
            println!("{}", report.summary);

            println!("\nPhone numbers:");
            for line in phone_listing(&report.rows) {
                println!("{}", line);
            }
        }
        Err(e) => fail(&e),
    }
}
