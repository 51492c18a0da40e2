pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod logging;
pub mod picker;
pub mod playback;
pub mod signal;
pub mod tools;
pub mod tracks;
pub mod utils;

#[cfg(feature = "keys")]
pub mod input;
