pub mod connectors;
pub mod market;

pub use connectors::{CsvConnector, DataValidator};
pub use market::{MarketData, PriceSeries, SeriesSplit};
