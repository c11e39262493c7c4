//! Shared helpers for backend tests: quiet logging bootstrap and
//! Problem Details assertions that do not depend on backend types.

pub mod logging;
pub mod problem_details;
