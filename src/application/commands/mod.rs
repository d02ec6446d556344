pub mod audit;
pub mod preferences;
