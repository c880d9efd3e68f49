//! SQL builder: identifiers from validated config or the live catalog, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
