mod convert;

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;
use layout::LayoutOptions;
use miette::{IntoDiagnostic, Result};

#[derive(Parser, Debug)]
#[command(name = "sno-cli")]
#[command(about, version, long_about = None)]
struct Cli {
    /// Binary file (.gam, .mon, .acr, .qst) or JSON document
    input: PathBuf,
    /// JSON document or binary file to produce
    output: PathBuf,
    /// Read monster trailers at the legacy fixed offsets
    #[arg(long, env = "MON_PARSER_LEGACY", value_parser = BoolishValueParser::new())]
    legacy: bool,
    /// Keep recorded block offsets when writing monsters
    #[arg(long, env = "MON_PRESERVE_OFFSETS", value_parser = BoolishValueParser::new())]
    preserve_offsets: bool,
    /// Relocate a preserved block instead of failing when it would overlap
    #[arg(long, env = "MON_RELOCATE_ON_CONFLICT", value_parser = BoolishValueParser::new())]
    relocate_on_conflict: bool,
    /// Log layout decisions
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            force_legacy_monster: self.legacy,
            preserve_offsets: self.preserve_offsets,
            relocate_on_conflict: self.relocate_on_conflict,
        }
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let stdout = console::Term::stdout();
    let summary = convert::run(&cli.input, &cli.output, &cli.layout_options())?;
    let text = format!("{} {summary}", console::style("OK:").green().bold());
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}
