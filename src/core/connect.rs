use crate::client::StoreClient;
use crate::config::Config;
use crate::config::credentials;
use crate::errors::AppResult;
use crate::store::SqliteWorkbook;

/// Resolve the credential and open the configured workbook.
/// One connection per command; it is released when the client drops.
pub fn open_client(cfg: &Config) -> AppResult<StoreClient<SqliteWorkbook>> {
    let cred = credentials::resolve(&cfg.credentials_file)?;
    let ranges = cfg.ranges()?;
    let workbook = SqliteWorkbook::open(&cfg.workbook_path(), &cred)?;
    Ok(StoreClient::new(workbook, ranges))
}
