use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::connect::open_client;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_confirmation, info, success};

/// Move one report to the archive, selected by row number or by key.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Archive {
        index,
        key,
        password,
        yes,
    } = cmd
    {
        let session = AuthLogic::admin_session(&cfg.guard(), password.as_deref())?;
        let mut client = open_client(cfg)?;

        let receipt = if let Some(key) = key {
            if !*yes {
                let label = match client.find_by_key(key)? {
                    Some((_, e)) => e.label(),
                    None => key.clone(),
                };
                if !ask_confirmation(&format!("Archive {label}?")) {
                    info("Archive cancelled.");
                    return Ok(());
                }
            }
            client.archive_by_key(&session, key)?
        } else if let Some(index) = index {
            let entries = client.list_entries()?;
            let entry = index
                .checked_sub(1)
                .and_then(|i| entries.get(i))
                .cloned()
                .ok_or_else(|| {
                    AppError::EntryNotFound(format!(
                        "row {index} (the list has {} row(s))",
                        entries.len()
                    ))
                })?;

            if !*yes && !ask_confirmation(&format!("Archive {}?", entry.label())) {
                info("Archive cancelled.");
                return Ok(());
            }
            client.archive_and_remove(&session, *index, &entry)?
        } else {
            return Err(AppError::Validation("pass --index or --key".into()));
        };

        if receipt.resumed {
            success(format!(
                "Archive completed for {} (copy already present, row {} removed)",
                receipt.entry.label(),
                receipt.row_index
            ));
        } else {
            success(format!(
                "Archived {} from row {}",
                receipt.entry.label(),
                receipt.row_index
            ));
        }
    }
    Ok(())
}
