pub mod country_extractor;
pub mod report;

pub use country_extractor::CountryExtractor;
pub use report::ExtractionReport;
