pub mod dates;
pub mod environment;

pub use dates::{format_date, format_date_in, format_date_millis};
pub use environment::AppConfig;
