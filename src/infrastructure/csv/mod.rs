// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Storefront export loading with encoding fallback

mod csv_parser;

pub use csv_parser::CsvParser;
