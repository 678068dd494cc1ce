pub mod analysis;
pub mod break_even;
pub mod growth;
pub mod holding_period;
pub mod params;
pub mod rent_to_emi;
pub mod scoring;
pub mod summary;
pub mod yields;
