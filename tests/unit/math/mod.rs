pub mod ordered;
pub mod statistics;
