mod cli;
mod scene;

const DEFAULT_TICKS_PER_SECOND: u32 = 72;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let verbose = args.iter().any(|arg| arg == "--verbose");
    let ticks_per_second = match args.iter().position(|arg| arg == "--ticks-per-second") {
        Some(index) => {
            let value = args
                .get(index + 1)
                .ok_or_else(|| anyhow::anyhow!("--ticks-per-second needs a value"))?;
            value.parse::<u32>()?.max(1)
        }
        None => DEFAULT_TICKS_PER_SECOND,
    };

    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    log::info!("Running scripted scenarios at {} ticks per second", ticks_per_second);
    cli::run_scenarios(ticks_per_second)
}
