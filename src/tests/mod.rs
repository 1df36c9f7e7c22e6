// asma-indexer test infrastructure
//
// Unit and integration tests for header extraction, field parsing, the index
// gateway and the walk pipeline. Shared fixture builders live in `helpers`.


pub mod sap {
    pub mod fields_tests; // Positional field extraction, year and stereo rules
    pub mod header_tests; // Sentinel split and file reads
}

pub mod search {
    pub mod index_tests; // Open/create fallback, batches, upserts, schema checks
}

pub mod ingest {
    pub mod pipeline_tests; // Directory walk, batch sizing, skip policies
}
