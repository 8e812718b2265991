// apps/rg_cli/src/commands/mod.rs

//! 子命令实现

pub mod geometry;
pub mod info;
pub mod sample;
pub mod validate;
