pub mod calendar;
pub mod data_type;
pub mod matrix;
pub mod selection;
