mod session;

pub use session::SessionCommands;
