mod chart;
mod dataset;
mod passenger;
mod survival;

pub use chart::ChartVariant;
pub use dataset::{Dataset, DatasetError};
pub use passenger::{Passenger, PassengerError, Pclass, Sex, parse_survived};
pub use survival::{SurvivalCell, SurvivalTable};
