use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use scrollreel::{
    EvaluatedFrame, Page, PageConfig, PinLayout, Progress, RecordingAdapter, StaticProbe,
};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a page config and report every rejected region.
    Validate(ValidateArgs),
    /// Print the evaluated frame of each region at one scroll offset, as JSON.
    Sample(SampleArgs),
    /// Step through scroll offsets and print one line per offset and region.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input page config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input page config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Document scroll offset in px.
    #[arg(long, allow_negative_numbers = true)]
    offset: f64,

    /// Only print this region.
    #[arg(long)]
    region: Option<String>,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Input page config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    from: f64,

    #[arg(long, allow_negative_numbers = true)]
    to: f64,

    #[arg(long, default_value_t = 100.0)]
    step: f64,
}

#[derive(serde::Serialize)]
struct RegionSample<'a> {
    region: &'a str,
    progress: Progress,
    pin: Option<&'a PinLayout>,
    frame: Option<EvaluatedFrame>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load(in_path: &Path) -> anyhow::Result<(PageConfig, Page)> {
    let config = PageConfig::from_path(in_path)
        .with_context(|| format!("load page config '{}'", in_path.display()))?;
    let (page, rejected) = Page::from_config(&config);
    if let Some((id, err)) = rejected.into_iter().next() {
        anyhow::bail!("region '{id}' rejected: {err}");
    }
    Ok((config, page))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config = PageConfig::from_path(&args.in_path)
        .with_context(|| format!("load page config '{}'", args.in_path.display()))?;
    let (page, rejected) = Page::from_config(&config);

    for region in page.regions() {
        println!(
            "ok {} scenes={} layers={}",
            region.id(),
            region.table().len(),
            region.table().layer_count()
        );
    }
    for (id, err) in &rejected {
        println!("rejected {id}: {err}");
    }
    if !rejected.is_empty() {
        anyhow::bail!("{} of {} regions rejected", rejected.len(), config.regions.len());
    }
    Ok(())
}

// Jump to `offset` and let pin transitions settle, as if the user had stopped there.
fn settle_at(
    page: &mut Page,
    probe: &mut StaticProbe,
    adapter: &mut RecordingAdapter,
    offset: f64,
) {
    probe.set_offset(offset);
    for _ in 0..2 {
        page.on_scroll(offset);
        page.on_frame(&*probe, adapter);
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.offset.is_finite(), "offset must be finite");
    let (config, mut page) = load(&args.in_path)?;
    if let Some(id) = &args.region {
        anyhow::ensure!(page.region(id).is_some(), "no region named '{id}'");
    }

    let mut probe = config.static_probe();
    let mut adapter = RecordingAdapter::new();
    settle_at(&mut page, &mut probe, &mut adapter, args.offset);

    let samples: Vec<RegionSample<'_>> = page
        .regions()
        .iter()
        .filter(|r| args.region.as_deref().is_none_or(|id| id == r.id()))
        .map(|r| RegionSample {
            region: r.id(),
            progress: r.progress(),
            pin: adapter.pin(r.id()),
            frame: r.frame().ok(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&samples).context("serialize samples")?;
    println!("{json}");
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.from.is_finite() && args.to.is_finite(),
        "--from and --to must be finite"
    );
    anyhow::ensure!(args.from <= args.to, "--from must not exceed --to");
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be finite and > 0"
    );

    let (config, mut page) = load(&args.in_path)?;
    let mut probe = config.static_probe();
    let mut adapter = RecordingAdapter::new();

    let steps = ((args.to - args.from) / args.step).floor() as u64;
    for i in 0..=steps {
        let offset = args.from + i as f64 * args.step;
        probe.set_offset(offset);
        page.on_scroll(offset);
        page.on_frame(&probe, &mut adapter);

        for region in page.regions() {
            let progress = match region.progress() {
                Progress::Value(p) => format!("{p:.4}"),
                Progress::Degenerate => "degenerate".to_owned(),
                Progress::Unmeasured => "unmeasured".to_owned(),
            };
            let (dominant, fingerprint) = match region.frame() {
                Ok(frame) => (
                    frame.dominant.to_string(),
                    format!("{:016x}", frame.fingerprint()),
                ),
                Err(_) => ("-".to_owned(), "-".to_owned()),
            };
            println!(
                "{offset}\t{}\t{progress}\t{:?}\t{dominant}\t{fingerprint}",
                region.id(),
                region.pin_state(),
            );
        }
    }
    Ok(())
}
