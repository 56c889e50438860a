//! Parsers for the NEO source datasets.
//!
//! Two raw formats feed the population:
//!
//! - [`csv_parser`]: NASA's NEO catalog (`neos.csv`), one row per object
//!   with ~75 columns of which four matter here.
//! - [`json_parser`]: JPL's close-approach table (`cad.json`), a columnar
//!   `fields` + `data` layout with one array per approach.
//!
//! Both parsers reduce each raw record to the keyed field map the model
//! constructors take, so every data-quality rule lives in one place.

pub mod csv_parser;
pub mod json_parser;
