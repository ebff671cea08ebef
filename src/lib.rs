pub mod arch;
pub mod dasm;
pub mod error;
