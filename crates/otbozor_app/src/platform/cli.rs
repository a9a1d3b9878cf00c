use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::logging::LogDestination;

/// Otbozor horse marketplace from the terminal.
#[derive(Debug, Parser)]
#[command(name = "otbozor", version, about)]
pub struct Cli {
    /// RON config file; defaults to ./otbozor.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config and environment.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the session token is kept.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    pub log: Option<LogDestination>,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange the code from the Telegram bot for a session.
    Login { code: String },
    Logout,
    Whoami,
    /// Search approved listings.
    Browse(BrowseArgs),
    Regions,
    Districts { region_id: String },
    Breeds,
    /// Your listings with their status and available actions.
    MyListings {
        #[arg(long, default_value = "all")]
        filter: String,
    },
    MyProducts {
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Run one row action (submit, archive, delete, pay, reactivate, edit, finish).
    Action {
        listing_id: String,
        action: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Create a listing and send it to moderation.
    Create(ListingArgs),
    /// Change an existing listing and resubmit it.
    Edit {
        listing_id: String,
        #[command(flatten)]
        fields: ListingArgs,
    },
    Favorites {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Remove this listing from favorites.
        #[arg(long)]
        remove: Option<String>,
    },
    Favorite { listing_id: String },
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Args, Default)]
pub struct BrowseArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub min_price: Option<u64>,
    #[arg(long)]
    pub max_price: Option<u64>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListingArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    #[arg(long)]
    pub birth_year: Option<u16>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub price: Option<u64>,
    #[arg(long, value_enum)]
    pub currency: Option<CurrencyArg>,
    #[arg(long)]
    pub negotiable: bool,
    #[arg(long)]
    pub documents: bool,
    /// Photo or video URL; repeat for several.
    #[arg(long = "media")]
    pub media: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Stallion,
    Mare,
    Gelding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurrencyArg {
    Uzs,
    Usd,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// The moderation table.
    Listings(AdminTableArgs),
    Approve {
        listing_id: String,
        #[command(flatten)]
        table: AdminTableArgs,
    },
    Reject {
        listing_id: String,
        /// Without a reason nothing is sent.
        #[arg(long)]
        reason: Option<String>,
        #[command(flatten)]
        table: AdminTableArgs,
    },
    Delete {
        listing_id: String,
        #[arg(long)]
        yes: bool,
        #[command(flatten)]
        table: AdminTableArgs,
    },
}

#[derive(Debug, Args, Clone)]
pub struct AdminTableArgs {
    /// all, pending, approved, rejected, expired, paid, archived
    #[arg(long, default_value = "pending")]
    pub tab: String,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub sale_source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_collects_repeated_media() {
        let cli = Cli::parse_from([
            "otbozor",
            "create",
            "--title",
            "Qorabayir",
            "--media",
            "https://cdn.example.uz/1.jpg",
            "--media",
            "https://cdn.example.uz/2.mp4",
        ]);
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.title.as_deref(), Some("Qorabayir"));
                assert_eq!(args.media.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::parse_from(["otbozor", "whoami", "--api-url", "http://127.0.0.1:9"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9"));
    }
}
