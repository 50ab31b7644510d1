use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::connect::open_client;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Recover { password } = cmd {
        let session = AuthLogic::admin_session(&cfg.guard(), password.as_deref())?;
        let mut client = open_client(cfg)?;

        match client.resume_pending_archives(&session)? {
            0 => info("No interrupted archives found."),
            n => success(format!("Completed {n} interrupted archive(s)")),
        }
    }
    Ok(())
}
