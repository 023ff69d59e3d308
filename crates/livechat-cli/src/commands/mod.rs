pub mod paths;
pub mod records;
pub mod seed;
