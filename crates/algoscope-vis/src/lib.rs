//! Algoscope Visualization
//!
//! Playback of generated algorithm animations behind a JSON web API.
//!
//! # Architecture
//!
//! - **Session**: Selected family and algorithm, the dataset and its generated steps
//! - **Playback**: Step through the sequence at an adjustable speed
//! - **Driver**: Interval timer that advances playback, cancelled on every change
//! - **REST API / WebSocket**: Control playback and read the current frame
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let server = VisServer::from_config(&config);
//! server.serve(config.addr).await?;
//! ```

mod config;
mod driver;
mod error;
mod playback;
mod server;
mod session;

pub use config::VisConfig;
pub use driver::{Controller, Direction};
pub use error::{Error, Result};
pub use playback::{PlaybackState, PlaybackStatus, Player, Speed, SpeedRange};
pub use server::VisServer;
pub use session::Session;
