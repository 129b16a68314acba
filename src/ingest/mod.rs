pub mod error;

use crate::datamodel::{Dataset, InsertDataset, validate};
use crate::importers::parse;
use crate::storage::StorageInstance;
pub use error::{ErrorDetail, ErrorKind, IngestError};
use tracing::{error, info, warn};

/// Parses and validates an upload, without storing it.
pub fn prepare_upload(bytes: &[u8], file_name: &str) -> Result<InsertDataset, IngestError> {
    let table = parse(bytes, file_name)?;
    let dataset = validate(table.into_candidate(file_name))?;
    Ok(dataset)
}

/// Runs the whole upload pipeline: parse, validate, then store.
///
/// Nothing is stored unless the file is accepted in full.
pub async fn ingest_upload(
    storage: &dyn StorageInstance,
    bytes: &[u8],
    file_name: &str,
) -> Result<Dataset, IngestError> {
    let prepared = match prepare_upload(bytes, file_name) {
        Ok(prepared) => prepared,
        Err(err) => {
            log_rejection(file_name, &err);
            return Err(err);
        }
    };

    let rows = prepared.data().len();
    let dataset = storage
        .create_dataset(prepared)
        .await
        .map_err(IngestError::Storage)
        .inspect_err(|err| log_rejection(file_name, err))?;

    info!(
        "Stored {} as dataset {} ({} columns, {} rows)",
        file_name,
        dataset.id,
        dataset.headers.len(),
        rows
    );
    Ok(dataset)
}

fn log_rejection(file_name: &str, err: &IngestError) {
    if err.is_client_error() {
        warn!("Rejected {} ({}): {}", file_name, err.kind(), err);
    } else {
        error!("Failed to ingest {}: {:?}", file_name, err);
    }
}
