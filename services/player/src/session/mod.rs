pub mod command;
pub mod event_loop;
pub mod render;
pub mod state;

pub use event_loop::run;
pub use state::{PlayerSession, PolledSurface, Reply};
