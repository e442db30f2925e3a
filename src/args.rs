use clap::{Parser, ValueEnum};
use json_harvest::LinkStrategy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "json-harvest")]
#[command(about = "Download the JSON files linked from a page and render them as HTML tables")]
#[command(version)]
pub struct Args {
    /// Page to scan for JSON links
    pub url: Option<String>,

    /// Output directory (receives "json files" and "html files")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file; command-line values override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How links are found in the page
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Only keep links matching this regex (repeatable)
    #[arg(long = "include")]
    pub include: Vec<String>,

    /// Drop links matching this regex (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Only keep links on the page's host
    #[arg(long)]
    pub same_host: bool,

    /// Write keys and strings into the HTML without escaping
    #[arg(long)]
    pub no_escape: bool,

    /// Stop after downloading
    #[arg(long)]
    pub download_only: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Quoted strings ending in .json anywhere in the page text
    Quoted,
    /// href/src attributes ending in .json
    Markup,
}

impl From<StrategyArg> for LinkStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Quoted => LinkStrategy::Quoted,
            StrategyArg::Markup => LinkStrategy::Markup,
        }
    }
}
