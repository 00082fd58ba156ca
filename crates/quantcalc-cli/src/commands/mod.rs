//! CLI command implementations.

pub mod bond;
pub mod bootstrap;
pub mod config;
pub mod option;

pub use bond::BondArgs;
pub use bootstrap::BootstrapArgs;
pub use config::ConfigArgs;
pub use option::OptionArgs;
