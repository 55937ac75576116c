//! FashionHub CLI - Terminal storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog with filters
//! fashionhub browse --category men --price 500-1000 --search shirt
//!
//! # Look up a single product
//! fashionhub product P1
//!
//! # Show categories with product counts
//! fashionhub categories
//!
//! # Account session
//! fashionhub account login -e shopper@example.com -p secret
//! fashionhub account whoami
//! fashionhub account logout
//! ```
//!
//! # Commands
//!
//! - `browse` - Fetch, filter, and list catalog products
//! - `product` - Show one product in detail
//! - `categories` - Show categories with per-category stats
//! - `account` - Login, register, check-email, whoami, logout

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "fashionhub")]
#[command(author, version, about = "FashionHub terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and list products matching the given filters
    Browse {
        /// Category name (case-insensitive; omit for all categories)
        #[arg(long)]
        category: Option<String>,

        /// Brand name (case-insensitive; omit for all brands)
        #[arg(long)]
        brand: Option<String>,

        /// Price range: `500-1000`, `5000+`, or `all`
        #[arg(long)]
        price: Option<String>,

        /// Search term matched against product name and description
        #[arg(long)]
        search: Option<String>,

        /// Product-ID query; overrides --search entirely
        #[arg(long)]
        id: Option<String>,
    },
    /// Show one product in detail
    Product {
        /// Product ID (e.g., P1)
        product_id: String,
    },
    /// Show categories with product counts and average discounts
    Categories,
    /// Manage the account session
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Log in and persist the session
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account (does not log in)
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters, enforced server-side)
        #[arg(short, long)]
        password: String,

        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Check whether an email address is free to register
    CheckEmail {
        /// Email address
        email: String,
    },
    /// Show the persisted session, if any
    Whoami,
    /// Log out and clear the persisted session
    Logout,
}

#[tokio::main]
async fn main() {
    // Default to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fashionhub=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // Lint exception: the CLI's one user-facing failure path
        #[allow(clippy::print_stderr)]
        {
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Browse {
            category,
            brand,
            price,
            search,
            id,
        } => commands::catalog::browse(category, brand, price, search, id).await,
        Commands::Product { product_id } => commands::catalog::product(&product_id).await,
        Commands::Categories => commands::catalog::categories().await,
        Commands::Account { action } => match action {
            AccountAction::Login { email, password } => {
                commands::account::login(&email, &password).await
            }
            AccountAction::Register {
                first_name,
                last_name,
                email,
                password,
                phone,
            } => commands::account::register(first_name, last_name, &email, password, phone).await,
            AccountAction::CheckEmail { email } => commands::account::check_email(&email).await,
            AccountAction::Whoami => commands::account::whoami(),
            AccountAction::Logout => commands::account::logout(),
        },
    }
}
