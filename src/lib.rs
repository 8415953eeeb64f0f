//! eSIM marketplace core: traveler levels, wallet top-ups, referral credit and
//! the bottom-sheet drag handling used by every checkout modal.

pub mod commands;
pub mod config;
pub mod context;
pub mod db;
pub mod engine;
pub mod gesture;
pub mod models;
pub mod services;
pub mod utils;
