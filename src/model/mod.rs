pub mod config;
pub mod error;
pub mod genetics;
pub mod history;
pub mod lifecycle;
pub mod lineage;
pub mod observer;
pub mod world;
