//! Jukebox HUD
//!
//! Headless front end for the Jukebox playback engine: a HUD view model
//! bound to engine notifications, a simulated audio output on a virtual
//! clock, and the frame loop that drives them.

pub mod config;
pub mod error;
pub mod hud;
pub mod session;
pub mod sim;

pub use config::{AppConfig, HudSettings};
pub use error::{HudError, Result};
pub use hud::{Hud, HudView};
pub use session::{parse_track, Session, SessionSummary};
pub use sim::{SimClock, SimulatedOutput};
