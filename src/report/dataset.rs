use crate::client::StoreClient;
use crate::errors::AppError;
use crate::models::entry::Entry;
use crate::store::TabularStore;

/// Result of fetching the report list, keeping "nothing there" apart from
/// "could not look".
#[derive(Debug)]
pub enum Dataset {
    Loaded(Vec<Entry>),
    Empty,
    Failed(AppError),
}

impl Dataset {
    pub fn fetch<S: TabularStore>(client: &StoreClient<S>) -> Self {
        match client.list_entries() {
            Ok(v) if v.is_empty() => Dataset::Empty,
            Ok(v) => Dataset::Loaded(v),
            Err(e) => Dataset::Failed(e),
        }
    }

    /// Turn a failed fetch back into an error, keep the rest.
    pub fn into_result(self) -> Result<Vec<Entry>, AppError> {
        match self {
            Dataset::Loaded(v) => Ok(v),
            Dataset::Empty => Ok(Vec::new()),
            Dataset::Failed(e) => Err(e),
        }
    }
}
