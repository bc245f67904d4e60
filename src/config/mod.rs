pub(crate) mod ingest;
pub(crate) mod markup;
