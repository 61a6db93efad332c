//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vitalink_core::export::ExportFormat;

/// Command-line client for Vitalink health records.
#[derive(Parser, Debug)]
#[command(name = "vitalink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep the session token in a file instead of the OS keychain
    #[arg(long, global = true)]
    pub file_session: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// End the session and forget the token
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Medical profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Stored documents
    #[command(subcommand)]
    Documents(DocumentsCommand),
    /// Structured health records
    #[command(subcommand)]
    Records(RecordsCommand),
    /// Trigger an SOS alert
    Sos(SosArgs),
    /// Emergency events, contacts and public info
    #[command(subcommand)]
    Emergency(EmergencyCommand),
    /// Download an export of all records
    Export {
        #[arg(long, default_value_t = ExportFormat::Pdf)]
        format: ExportFormat,
        /// File or directory to write to (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Share links
    #[command(subcommand)]
    Share(ShareCommand),
    /// Fetch profile, documents, records and contacts together
    Dashboard,
    /// Show the effective configuration
    Config,
    /// Check whether an image URL may be displayed
    ImageCheck { url: String },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the profile
    Show {
        /// Use the cached copy instead of the server
        #[arg(long)]
        offline: bool,
    },
    /// Update profile fields
    Set(ProfileSetArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileSetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub blood_type: Option<String>,
    /// Replace the allergy list (repeatable)
    #[arg(long = "allergy")]
    pub allergies: Vec<String>,
    /// Replace the medication list (repeatable)
    #[arg(long = "medication")]
    pub medications: Vec<String>,
    /// Replace the condition list (repeatable)
    #[arg(long = "condition")]
    pub conditions: Vec<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
    List {
        #[arg(long)]
        offline: bool,
    },
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    Rm {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    List {
        #[arg(long)]
        offline: bool,
    },
    Add {
        #[arg(long = "type")]
        record_type: String,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Rm {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct SosArgs {
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum EmergencyCommand {
    /// List SOS events
    Events,
    /// Mark an SOS event resolved
    Resolve { id: String },
    /// List emergency contacts
    Contacts {
        #[arg(long)]
        offline: bool,
    },
    /// Add an emergency contact
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        relationship: Option<String>,
    },
    /// Remove an emergency contact
    RmContact { id: String },
    /// Public emergency card for a user
    Info { user_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ShareCommand {
    /// Create a share link
    Create {
        /// Hours until the link expires
        #[arg(long)]
        hours: Option<u32>,
        /// Require this password to open the link
        #[arg(long)]
        password: bool,
        /// Require a one-time code to open the link
        #[arg(long)]
        otp: bool,
        /// Only share emergency information
        #[arg(long)]
        emergency_only: bool,
    },
    /// List share links
    List {
        #[arg(long)]
        offline: bool,
    },
    /// Revoke a share link
    Revoke { id: String },
    /// Open a share link as a visitor
    View {
        token: String,
        /// Prompt for the link password
        #[arg(long, conflicts_with = "otp")]
        password: bool,
        /// Request and enter a one-time code
        #[arg(long)]
        otp: bool,
    },
}
