pub mod asset;
pub mod config;
pub mod consts;
pub mod display;
pub mod error;
pub mod placeholder;
pub mod player;
pub mod probe;
pub mod scroll;
