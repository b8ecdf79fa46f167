use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Personal contact book")]
pub struct Cli {
    /// Storage medium (memory, file). Overrides CONTACTS_STORAGE
    #[arg(long)]
    pub storage: Option<String>,

    /// Directory holding the storage slot files. Overrides CONTACTS_DATA_DIR
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Name of the storage slot. Overrides CONTACTS_STORAGE_KEY
    #[arg(long)]
    pub storage_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact email address
        #[arg(long)]
        email: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Postal address
        #[arg(long)]
        address: Option<String>,
    },
    /// List all contacts
    List,
    /// Show contacts whose name, email or phone contains TERM
    Search {
        /// Text to look for (case-insensitive for name and email)
        #[arg(default_value = "")]
        term: String,
    },
    /// Edit an existing contact.
    /// Fields that are not given keep their current value
    Edit {
        /// Id of the contact to edit
        #[arg(long)]
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New postal address (empty string clears it)
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a contact by id
    Delete {
        /// Id of the contact to delete
        #[arg(long)]
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import contacts from a .csv file (name,email,phone[,address])
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<String>,
    },
    /// Export contacts to a .csv file
    Export {
        /// Destination .csv file or directory
        #[arg(short, long)]
        dest: Option<String>,
    },
}
