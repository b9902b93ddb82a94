mod common;
mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::{FileLoader, parse_seeds, split_csv};
use logic::{GameplayStrategy, LogicTester, StrategyResult};
use yijing_game::{DataLoader, GameConfig};

#[derive(Debug, Parser)]
#[command(name = "yijing-tester", version = "0.1.0")]
#[command(about = "Seeded self-play QA for the Yijing card game engine")]
struct Args {
    /// Strategies to run (comma-separated, or "all")
    #[arg(long, default_value = "steady")]
    strategies: String,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Seeds to run (comma-separated, decimal or 0x-prefixed hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of games per seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Player names seated in every game (comma-separated)
    #[arg(long, default_value = "Fuxi,Wen,Zhou")]
    players: String,

    /// Rules document to load instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Card catalog to load instead of the bundled one
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let strategies = expand_strategies(&args.strategies)?;
    let seeds = parse_seeds(&args.seeds)?;
    let players = split_csv(&args.players);

    let loader = FileLoader::new(args.config.clone(), args.cards.clone());
    let config = GameConfig::from_provider(&loader.load_config()?);
    let catalog = loader.load_catalog()?;
    log::info!(
        "loaded {} cards; victory at {} merit",
        catalog.len(),
        config.victory.merit
    );

    let tester = LogicTester::new(config, catalog, players, args.verbose);
    let results: Vec<StrategyResult> = strategies
        .iter()
        .map(|strategy| tester.run_strategy(*strategy, &seeds, args.iterations))
        .collect();

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for strategy in GameplayStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:12} - {}",
            strategy.label().to_lowercase(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "☯ Yijing Automated Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn expand_strategies(arg: &str) -> Result<Vec<GameplayStrategy>> {
    let tokens = split_csv(arg);
    if tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
        return Ok(GameplayStrategy::ALL.to_vec());
    }
    let strategies = tokens
        .iter()
        .map(|token| token.parse::<GameplayStrategy>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;
    if strategies.is_empty() {
        bail!("no strategies selected");
    }
    Ok(strategies)
}

fn write_reports(args: &Args, results: &[StrategyResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, results)?,
        _ => logic::reports::generate_console_report(
            &mut output_target,
            results,
            start_time.elapsed(),
        )?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
