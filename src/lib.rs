#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod common;
mod config;
mod game;
mod placement;
mod scan;
mod session;
mod ship;
mod store;
mod tag;
mod ui;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
mod file_store;
#[cfg(feature = "std")]
pub mod hub;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod transport;

pub use common::*;
pub use config::*;
pub use game::*;
pub use placement::*;
pub use scan::*;
pub use session::*;
pub use ship::*;
pub use store::*;
pub use tag::*;
pub use ui::*;
#[cfg(feature = "std")]
pub use client::ScanClient;
#[cfg(feature = "std")]
pub use file_store::{BlobFormat, FileStore};
#[cfg(feature = "std")]
pub use hub::SessionHub;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::{Reply, Request, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use server::ScanServer;
