use crate::{
    cli::{
        command::{Cli, Commands},
        terminal::TerminalPresenter,
    },
    prelude::{
        AppError, Config, ContactBook, ContactForm, ContactId, ContactStore, Presenter,
        parse_storage_type,
        storage::csv_port::{export_contacts_to_csv, import_contacts_from_csv},
    },
};
use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};

pub fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = Config::from_env()?.with_overrides(
        cli.storage.as_deref(),
        cli.data_dir,
        cli.storage_key.as_deref(),
    )?;

    run(cli.command, &config)
}

pub fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    let storage = parse_storage_type(config);
    let mut store = ContactStore::initialize_with_key(storage, &config.storage_key)?;

    info!(
        "Current storage choice is: {}",
        config.storage_medium.is_which()
    );

    match command {
        Commands::Add {
            name,
            email,
            phone,
            address,
        } => {
            let mut book = ContactBook::new(store, TerminalPresenter::quiet());

            let contact = book.submit(ContactForm {
                name,
                email,
                phone,
                address: address.unwrap_or_default(),
            })
            .map_err(AppError::reported)?;

            println!("Id: {}", contact.id);
            Ok(())
        }

        Commands::List => {
            TerminalPresenter::default().render(&store.get_all());
            Ok(())
        }

        Commands::Search { term } => {
            TerminalPresenter::default().render(&store.search(&term));
            Ok(())
        }

        Commands::Edit {
            id,
            name,
            email,
            phone,
            address,
        } => {
            let mut book = ContactBook::new(store, TerminalPresenter::quiet());
            let mut form = book.begin_edit(ContactId(id))?;

            if let Some(name) = name {
                form.name = name;
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(phone) = phone {
                form.phone = phone;
            }
            if let Some(address) = address {
                form.address = address;
            }

            book.submit(form).map_err(AppError::reported)?;
            Ok(())
        }

        Commands::Delete { id, yes } => {
            let id = ContactId(id);

            let Some(contact) = store.get(id) else {
                println!("{}, nothing to delete", AppError::NotFound(id));
                return Ok(());
            };

            if !yes {
                let message = format!(
                    "delete this contact from your contact list \n{}\n",
                    contact.name
                );
                if !confirm_action(&message)? {
                    println!("Delete cancelled");
                    return Ok(());
                }
            }

            let mut book = ContactBook::new(store, TerminalPresenter::quiet());
            book.request_delete(id);
            book.confirm_delete().map_err(AppError::reported)?;
            Ok(())
        }

        Commands::Import { src } => {
            let (path, summary) = import_contacts_from_csv(&mut store, src.as_deref())?;

            println!(
                "Successfully imported {} contacts from {:?}.",
                summary.imported, path
            );
            if summary.skipped > 0 {
                println!("Skipped {} row(s) with missing required fields.", summary.skipped);
            }
            Ok(())
        }

        Commands::Export { dest } => {
            let (path, total) = export_contacts_to_csv(&store.get_all(), dest.as_deref())?;

            println!("Successfully exported {} contacts to {:?}.", total, path);
            Ok(())
        }
    }
}

/// Asks a y/n question on stdin. Anything but `y` is a no.
pub fn confirm_action(action: &str) -> Result<bool, AppError> {
    print!("\nAre you sure you want to {}? (y/n) ", action);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
