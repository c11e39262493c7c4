//! Repository functions: domain structs in, domain structs out.

pub mod games;
pub mod moves;
