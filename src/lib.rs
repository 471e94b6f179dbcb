pub mod aggregate;
pub mod driver;
pub mod error;
pub mod layout;
pub mod logs;
pub mod record;
pub mod report;
