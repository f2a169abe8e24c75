//! Pet Adoption Portal CLI - command-line front end for the portal.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demo dataset and browse
//! pap-cli seed
//! pap-cli pets list --species Dog
//!
//! # Apply as the demo adopter
//! pap-cli login -e aarav@petportal-mail.com -p 'User@1234'
//! pap-cli apply pet-101 --phone "+1 (555) 110-2401" --city Riverdale \
//!     --address "12 Elm Street" --housing "House with yard" --experience "First dog"
//!
//! # Decide as the shelter
//! pap-cli login -e greenpaws@shelter.org -p 'Shelter@123'
//! pap-cli applications shelter
//! pap-cli applications approve app-...
//!
//! # Moderate as the administrator
//! pap-cli login -e admin@petportal.org -p 'Admin@123'
//! pap-cli shelters approve shelter-2
//! ```
//!
//! # Commands
//!
//! - `seed`, `reset-pets`, `export`, `stats` - Data lifecycle and reporting
//! - `login`, `logout`, `whoami`, `register` - Session and accounts
//! - `pets`, `apply`, `applications` - Catalog and adoption workflow
//! - `shelters`, `users` - Administrator moderation
//!
//! The session is persisted in the data directory, so each invocation acts
//! as whoever logged in last.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pet_portal::{Portal, PortalConfig};
use pet_portal_core::Decision;

mod commands;

use commands::CliError;
use commands::account::RegisterArgs;
use commands::applications::ApplyArgs;
use commands::pets::{ListArgs, PublishArgs};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "pet_portal=info,pap_cli=info";

#[derive(Parser)]
#[command(name = "pap-cli")]
#[command(author, version, about = "Pet Adoption Portal CLI")]
struct Cli {
    /// Data directory (overrides `PAP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed empty collections with the demo dataset
    Seed,
    /// Clear the pet catalog and seed it again
    ResetPets,
    /// Export every collection as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show portal statistics
    Stats,
    /// Log in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Register a new account
    Register {
        #[command(subcommand)]
        kind: RegisterKind,
    },
    /// Browse and publish pets
    Pets {
        #[command(subcommand)]
        action: PetsAction,
    },
    /// Apply to adopt a pet (adopter)
    Apply(ApplyArgs),
    /// List and decide applications
    Applications {
        #[command(subcommand)]
        action: ApplicationsAction,
    },
    /// Moderate shelters (administrator)
    Shelters {
        #[command(subcommand)]
        action: SheltersAction,
    },
    /// Moderate adopters (administrator)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum RegisterKind {
    /// Register an adopter (logs in immediately)
    User(RegisterArgs),
    /// Register a shelter (awaits administrator approval)
    Shelter(RegisterArgs),
}

#[derive(Subcommand)]
enum PetsAction {
    /// List available pets
    List(ListArgs),
    /// Show one pet
    Show {
        /// Pet ID
        id: String,
    },
    /// List the current shelter's pets (shelter)
    Mine,
    /// Publish a new pet or edit an existing one (shelter)
    Publish(PublishArgs),
}

#[derive(Subcommand)]
enum ApplicationsAction {
    /// List your applications (adopter)
    Mine,
    /// List applications for your pets (shelter)
    Shelter,
    /// Approve an application (shelter)
    Approve {
        /// Application ID
        id: String,
    },
    /// Reject an application (shelter)
    Reject {
        /// Application ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SheltersAction {
    /// Approve a shelter
    Approve {
        /// Shelter ID
        id: String,
    },
    /// Approve every pending, unblocked shelter
    ApproveAll,
    /// Block or unblock a shelter
    ToggleBlock {
        /// Shelter ID
        id: String,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Block or unblock an adopter
    ToggleBlock {
        /// User ID
        id: String,
    },
}

fn main() {
    // Load .env file if present so RUST_LOG applies
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli) {
        match e.kind() {
            Some(kind) => tracing::error!(%kind, "Command failed: {e}"),
            None => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = PortalConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    // Seeding explicitly should report what it did.
    if matches!(cli.command, Commands::Seed) {
        config.seed_on_open = false;
    }

    let portal = Portal::open(&config)?;

    match cli.command {
        Commands::Seed => commands::data::seed(&portal)?,
        Commands::ResetPets => commands::data::reset_pets(&portal)?,
        Commands::Export { output } => commands::data::export(&portal, output.as_deref())?,
        Commands::Stats => commands::data::stats(&portal),
        Commands::Login { email, password } => {
            commands::account::login(&portal, &email, password.into())?;
        }
        Commands::Logout => commands::account::logout(&portal)?,
        Commands::Whoami => commands::account::whoami(&portal),
        Commands::Register { kind } => match kind {
            RegisterKind::User(args) => commands::account::register_user(&portal, args)?,
            RegisterKind::Shelter(args) => commands::account::register_shelter(&portal, args)?,
        },
        Commands::Pets { action } => match action {
            PetsAction::List(args) => commands::pets::list(&portal, args),
            PetsAction::Show { id } => commands::pets::show(&portal, &id)?,
            PetsAction::Mine => commands::pets::mine(&portal)?,
            PetsAction::Publish(args) => commands::pets::publish(&portal, args)?,
        },
        Commands::Apply(args) => commands::applications::apply(&portal, args)?,
        Commands::Applications { action } => match action {
            ApplicationsAction::Mine => commands::applications::mine(&portal)?,
            ApplicationsAction::Shelter => commands::applications::shelter(&portal)?,
            ApplicationsAction::Approve { id } => {
                commands::applications::decide(&portal, &id, Decision::Approve)?;
            }
            ApplicationsAction::Reject { id } => {
                commands::applications::decide(&portal, &id, Decision::Reject)?;
            }
        },
        Commands::Shelters { action } => match action {
            SheltersAction::Approve { id } => commands::moderation::approve_shelter(&portal, &id)?,
            SheltersAction::ApproveAll => commands::moderation::approve_all(&portal)?,
            SheltersAction::ToggleBlock { id } => {
                commands::moderation::toggle_shelter_block(&portal, &id)?;
            }
        },
        Commands::Users { action } => match action {
            UsersAction::ToggleBlock { id } => {
                commands::moderation::toggle_user_block(&portal, &id)?;
            }
        },
    }
    Ok(())
}
