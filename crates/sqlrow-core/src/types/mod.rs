mod binary;
mod date_time;
mod decimal;

pub use binary::Binary;
pub use date_time::DateTime;
pub use decimal::Decimal;
