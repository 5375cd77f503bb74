pub mod effects;
pub mod parser;
pub mod types;
