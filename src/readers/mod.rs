pub mod archive_query;
pub mod archive_reader;

pub use archive_query::ArchiveQuery;
pub use archive_reader::{ArchiveReader, ArchiveSeries, ArchiveUnits};
