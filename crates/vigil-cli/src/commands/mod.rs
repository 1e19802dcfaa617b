//! Command implementations.

pub mod analyze;
pub mod compare;
pub mod report;

pub use self::analyze::execute_analyze;
pub use self::compare::execute_compare;
pub use self::report::execute_report;
