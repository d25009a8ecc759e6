//! Repository methods, implemented as `impl VentureDb` blocks.

mod events;
mod sessions;
