use crate::cli::parser::Cli;
use crate::client::StoreClient;
use crate::config::{Config, credentials};
use crate::errors::AppResult;
use crate::store::{SqliteWorkbook, TabularStore};
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (not in test mode)
///  - the workbook file with its sheets and header rows
///  - access for the resolved service credential
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;

    let cred = credentials::resolve(&cfg.credentials_file)?;
    let ranges = cfg.ranges()?;
    let path = cfg.workbook_path();

    println!("⚙️  Initializing teamlog…");
    println!("🗄️  Workbook    : {}", &path);
    println!("🤖 Credential  : {}", &cred.client_email);

    let workbook = SqliteWorkbook::create(&path, &cred, &ranges.sheet_names())?;
    let mut client = StoreClient::new(workbook, ranges);
    client.ensure_headers()?;

    if let Err(e) = client.store_mut().audit(
        "init",
        "",
        &format!("Workbook initialized at {}", &path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 teamlog initialization completed!");
    Ok(())
}
