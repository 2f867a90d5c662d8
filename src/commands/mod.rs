pub mod update;
pub mod versions;
