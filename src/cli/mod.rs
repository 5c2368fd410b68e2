//! Terminal pages and commands

pub mod conversion;
pub mod currency;
pub mod home;
pub mod setup;
pub mod ui;
