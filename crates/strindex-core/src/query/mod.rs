pub mod engine;
pub mod filter;
pub mod guards;
pub mod interpreter;
pub mod planner;
