use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use radarloop::{
    DeliverySink, DirArchive, DirSink, GeoPoint, RadarPipeline, Scheduler, Settings, StationTable,
    TokioClock, init_tracing, project, shutdown_channel,
};

#[derive(Parser, Debug)]
#[command(name = "radarloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the radar loop on its schedule (or once).
    Run(RunArgs),
    /// Print the pixel a lat/lon lands on in a product's images.
    Locate(LocateArgs),
    /// Print the effective settings as JSON.
    ShowConfig(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// YAML config file. Defaults to the first of the standard locations that exists.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Run a single cycle and exit, ignoring `scheduler.enabled`.
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[derive(Parser, Debug)]
struct LocateArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Radar product id.
    #[arg(long, default_value = "IDR022")]
    product: String,

    #[arg(long, default_value_t = 512)]
    width: u32,

    #[arg(long, default_value_t = 512)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Locate(args) => cmd_locate(args),
        Command::ShowConfig(args) => cmd_show_config(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let (path, mut settings) = Settings::resolve(args.config.config.as_deref())?;
    init_tracing(&settings.logging.level);
    if args.once {
        settings.scheduler.enabled = false;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %path.display(),
        product = %settings.radar.product_id,
        timezone = %settings.radar.timezone,
        "radarloop starting"
    );

    let stations = StationTable::australia();
    let archive = DirArchive::new(&settings.archive.root);
    let mut dir_sink = settings.delivery.root.as_ref().map(DirSink::new);
    let sink = dir_sink.as_mut().map(|s| s as &mut dyn DeliverySink);
    let mut pipeline = RadarPipeline::new(&settings, &stations, &archive, sink);

    let (trigger, shutdown) = shutdown_channel();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the scheduler")?;
    let summary = runtime.block_on(async {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received; shutting down");
                    trigger.trigger();
                }
                Err(err) => tracing::warn!(error = %err, "cannot listen for Ctrl+C"),
            }
        });
        let mut scheduler = Scheduler::new(settings.scheduler.clone(), TokioClock, shutdown);
        scheduler.run(&mut pipeline).await
    });

    if !settings.scheduler.enabled && summary.failures > 0 {
        anyhow::bail!("radar processing failed");
    }
    Ok(())
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    init_tracing("WARNING");
    let stations = StationTable::australia();
    let meta = stations.lookup(&args.product);
    let point = project(
        GeoPoint::new(args.lat, args.lon),
        meta,
        args.width,
        args.height,
    );

    let out = serde_json::json!({
        "product": args.product,
        "site": stations.get(&args.product).map(|s| s.site),
        "center": meta.center,
        "km_per_pixel": meta.km_per_pixel,
        "pixel": point,
        "inside": point.within(args.width, args.height),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize location")?
    );
    Ok(())
}

fn cmd_show_config(args: ConfigArgs) -> anyhow::Result<()> {
    let (path, settings) = Settings::resolve(args.config.as_deref())?;
    eprintln!("config: {}", path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context("serialize settings")?
    );
    Ok(())
}
