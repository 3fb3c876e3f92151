//! Commands
//!
//! Entry points a presentation layer calls. Each returns a response struct
//! carrying either the updated snapshot or a user-facing error.

pub mod generator;
pub mod launch;
pub mod records;
