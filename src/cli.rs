use clap::{Parser, Subcommand, ValueEnum};

use crate::model::SortKey;

#[derive(Parser)]
#[command(
    name = "minne-cli",
    version,
    about = "Search Minne marketplace listings from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the search backend (default: http://127.0.0.1:5000)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (default: 10000)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the sorted listings with price stats
    Search {
        /// Search keyword (e.g., "kimono", "obi belt")
        keyword: String,

        /// Sort order: price (ascending) or favorites (descending)
        #[arg(long, value_enum, default_value = "price")]
        sort: SortArg,

        /// Print the sorted listings and stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: search, re-sort and re-search without restarting
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Price,
    Favorites,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => SortKey::ByPrice,
            SortArg::Favorites => SortKey::ByFavoriteCount,
        }
    }
}
