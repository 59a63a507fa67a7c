#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod logs;
pub mod store;
pub mod track;
pub mod track_state;
mod utils;

pub use config::TrackStateConfig;
pub use store::{Readable, Store, Subscription, Writable};
pub use track::{Track, TrackPoint};
pub use track_state::{DragPhase, TrackState};
