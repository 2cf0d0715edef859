//! Algorithms that search for local minima of functions along multiple dimensions.

mod compass;

pub use self::compass::CompassSearch;
pub use self::compass::CompassSearchBuilder;
pub use self::compass::Round;

mod multi_start;
pub use self::multi_start::sample_starts;
pub use self::multi_start::{MultiStart, MultiStartBuilder, MultiStartResult};
