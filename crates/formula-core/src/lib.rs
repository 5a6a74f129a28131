pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod formula;
pub mod install;
pub mod installer;
pub mod platform;
pub mod resolve;
pub mod selftest;
pub mod template;

pub use error::InstallError;
pub use formula::{Formula, FormulaVars, PlatformTarget};
pub use installer::{InstallReport, Installer};
pub use platform::{Arch, Os};
