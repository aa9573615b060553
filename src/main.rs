use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use exam_test_gen::test_engine::{
    document::write_document, validator::quick_infeasibility,
};
use exam_test_gen::{generate_test, load_bank, render_document, LayoutStyle, Result, TestConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Simple,
    Fancy,
}

impl From<Preset> for LayoutStyle {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Simple => LayoutStyle::Simple,
            Preset::Fancy  => LayoutStyle::Fancy,
        }
    }
}

/// Draw a constrained random test from a problem bank and write it as TeX.
#[derive(Debug, Parser)]
#[command(name = "exam-test-gen", version)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Preset used when no config file is given.
    #[arg(long, value_enum, default_value = "simple", conflicts_with = "config")]
    preset: Preset,
    /// Problem bank (.tex or .json).
    #[arg(long, short)]
    bank: Option<PathBuf>,
    /// Where to write the generated test.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Seed for a reproducible draw.
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many rejected draws.
    #[arg(long, conflicts_with = "unbounded")]
    max_attempts: Option<u64>,
    /// Keep drawing until a valid test is found, however long it takes.
    #[arg(long)]
    unbounded: bool,
    /// Skip the up-front check for constraints the bank can never satisfy.
    #[arg(long)]
    no_precheck: bool,
}

impl Cli {
    fn config(&self) -> Result<TestConfig> {
        let mut config = match &self.config {
            Some(path) => TestConfig::load(path)?,
            None => TestConfig::preset(self.preset.into()),
        };
        if let Some(bank) = &self.bank {
            config.bank = bank.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        if self.unbounded {
            config.max_attempts = None;
        } else if self.max_attempts.is_some() {
            config.max_attempts = self.max_attempts;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;
    info!(
        "{} layout, {} ({})",
        config.layout,
        config.constraints,
        config.attempt_limit()
    );

    let bank = load_bank(&config.bank)?;
    if !cli.no_precheck {
        quick_infeasibility(&bank, &config.constraints)?;
    }

    let test = generate_test(&bank, config.request())?;
    info!(
        "test {} has {} problems, total difficulty {}, found after {} attempts",
        test.test_id,
        test.problems.len(),
        test.total_difficulty(),
        test.attempts
    );

    let header = config.header()?;
    let layout = config.layout.layout();
    let document = render_document(&header, layout.as_ref(), &test.problems);
    write_document(&config.output, &document)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
