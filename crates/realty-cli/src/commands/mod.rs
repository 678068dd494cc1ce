pub mod financing;
pub mod property;
