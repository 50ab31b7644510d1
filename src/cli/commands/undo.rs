use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::connect::open_client;
use crate::errors::AppResult;
use crate::ui::messages::{ask_confirmation, info, success};

/// Delete the last report row, without archiving it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Undo { password, yes } = cmd {
        let session = AuthLogic::admin_session(&cfg.guard(), password.as_deref())?;
        let mut client = open_client(cfg)?;

        let Some(last) = client.list_entries()?.pop() else {
            info("Nothing to undo.");
            return Ok(());
        };

        if !*yes
            && !ask_confirmation(&format!(
                "Permanently delete {} [{}]?",
                last.label(),
                last.description
            ))
        {
            info("Undo cancelled.");
            return Ok(());
        }

        if client.delete_last_entry(&session, Some(&last))? {
            success(format!("Deleted {}", last.label()));
        } else {
            info("Nothing to undo.");
        }
    }
    Ok(())
}
