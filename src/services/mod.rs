pub mod cities;
pub mod dataset;
pub mod normalizer;
