//! Auth-domain identifiers, credentials, modes, and header assembly.

pub mod context;
pub mod headers;
pub mod id;
pub mod mode;
pub mod secret;

pub use context::*;
pub use id::*;
pub use mode::*;
pub use secret::*;
