pub mod analyze;
pub mod registry;
pub mod suggest;
