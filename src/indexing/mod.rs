//! Turning parsed references into occurrences, and the queries and batch
//! operations built on top of them.

mod extending;
mod importing;
mod materialize;
mod nearby;
mod redirects;

pub use extending::*;
pub use importing::*;
pub use materialize::*;
pub use nearby::*;
pub use redirects::*;
