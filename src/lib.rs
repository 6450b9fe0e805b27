//! Exchange Tracker - combat exchange rules engine for tabletop sessions

pub mod combat;
pub mod core;
pub mod entity;
pub mod exchange;
pub mod techniques;
pub mod templates;
