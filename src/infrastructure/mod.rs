//! Infrastructure layer: storage backends, blob stores, logo resolution

pub mod blob;
pub mod logging;
pub mod logo;
pub mod team;
