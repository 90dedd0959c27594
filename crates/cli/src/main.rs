//! Userdeck CLI - Command-line client for the user-management backend.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! userdeck signup -f Ada -l Lovelace -e ada@example.com -p 'Sup3rSecret'
//!
//! # Log in and persist the token
//! userdeck login -e ada@example.com -p 'Sup3rSecret'
//!
//! # Inspect the current session
//! userdeck whoami
//!
//! # Admin operations
//! userdeck admin users --page 1 --limit 20
//! userdeck admin stats
//! userdeck admin export --format csv -o users.csv
//! ```
//!
//! # Commands
//!
//! - `signup` / `login` / `whoami` / `logout` - Session lifecycle
//! - `admin login` - Authenticate against the admin endpoint
//! - `admin users` - List users with filters
//! - `admin stats` - Dashboard aggregates
//! - `admin export` - Export users to a file
//! - `admin toggle` - Activate or deactivate an account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "userdeck")]
#[command(author, version, about = "Userdeck command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Signup {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 chars, upper + lower + digit)
        #[arg(short, long)]
        password: String,
    },
    /// Log in and persist the session token
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Show the account the stored token belongs to
    Whoami,
    /// End the session and drop the stored token
    Logout,
    /// Admin operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Authenticate against the admin login endpoint
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List users
    Users {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Search by name or email
        #[arg(long)]
        search: Option<String>,

        /// Activation filter (`all`, `active`, `inactive`)
        #[arg(long)]
        status: Option<String>,
    },
    /// Show dashboard aggregates
    Stats,
    /// Export users to a file
    Export {
        /// Export format (`json` or `csv`)
        #[arg(long, default_value = "json")]
        format: String,

        /// Activation filter (`all`, `active`, `inactive`)
        #[arg(long)]
        status: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: String,
    },
    /// Activate or deactivate an account
    Toggle {
        /// Target user id
        user_id: String,

        /// New activation state (`true` or `false`)
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Signup {
            first_name,
            last_name,
            email,
            password,
        } => commands::auth::signup(&first_name, &last_name, &email, &password).await?,
        Commands::Login { email, password } => commands::auth::login(&email, &password).await?,
        Commands::Whoami => commands::auth::whoami().await?,
        Commands::Logout => commands::auth::logout().await?,
        Commands::Admin { action } => match action {
            AdminAction::Login { email, password } => {
                commands::admin::login(&email, &password).await?;
            }
            AdminAction::Users {
                page,
                limit,
                search,
                status,
            } => commands::admin::list_users(page, limit, search, status).await?,
            AdminAction::Stats => commands::admin::stats().await?,
            AdminAction::Export {
                format,
                status,
                output,
            } => commands::admin::export(&format, status, &output).await?,
            AdminAction::Toggle { user_id, active } => {
                commands::admin::toggle(&user_id, active).await?;
            }
        },
    }
    Ok(())
}
