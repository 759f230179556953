pub mod brain_csv;

pub use brain_csv::*;
