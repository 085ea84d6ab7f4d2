use crate::domain::transaction::TransferRequest;
use crate::error::{Result, TransferError};
use std::io::Read;

/// Reads transfer requests (`sender,receiver,amount`) from a CSV source.
///
/// Whitespace around fields is trimmed. Each row is deserialized lazily, so a
/// malformed row yields an `Err` item without ending the stream.
pub struct TransferReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransferReader<R> {
    /// Creates a new `TransferReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<TransferRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(TransferError::from))
    }
}
