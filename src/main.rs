use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, error, info};

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use lcadre::{Args, Config, report, run};

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .init();

    if let Err(e) = try_main() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    info!("LCaDRE: Library Complexity and Duplication Rate Estimation");

    let config = Config::try_from(&args)?;
    info!(
        "input {} ({}), extrapolating to {} read pairs",
        config.alignment_file.display(),
        config.file_type,
        report::thousands(config.target_read_pairs)
    );

    let est = run(&config)?;
    report::report(&est);
    Ok(())
}
