// src/ui/widgets/mod.rs

pub mod footer;
pub mod input;
pub mod report;
pub mod technical;
