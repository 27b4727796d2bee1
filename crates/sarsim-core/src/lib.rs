#![deny(warnings)]
pub mod belief;
pub mod game;
pub mod model;
pub mod search;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "sarsim"
    }

    pub const fn codename() -> &'static str {
        "Cape Sweep"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
