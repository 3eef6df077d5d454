//! Application module containing the headless game loop
//!
//! Line commands are parsed in `command` and applied to a session in `driver`.

mod command;
mod driver;

pub use driver::run;
