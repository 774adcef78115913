pub mod cli;
pub mod link;
