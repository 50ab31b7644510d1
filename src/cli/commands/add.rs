use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::connect::open_client;
use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::ui::messages::success;

/// Submit a work report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { name, area, task } = cmd {
        //
        // 1. Validate input before touching the store
        //
        let area = cfg.resolve_area(area)?;
        let entry = Entry::new(name, &area, &task.join(" "))?;

        //
        // 2. Append
        //
        let mut client = open_client(cfg)?;
        client.append_entry(&entry)?;

        success(format!(
            "Saved! {} [{}] key {}",
            entry.label(),
            entry.description,
            entry.short_key()
        ));
    }

    Ok(())
}
