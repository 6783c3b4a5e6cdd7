pub mod types {
    /// Object number: type alias for `u64`.
    pub type ObjNum = u64;
    /// Object generation: type alias for `u16`.
    ///
    /// Generation numbers are written with five digits in a cross-reference table, but values
    /// above 65535 are not allowed and rejected as malformed.
    pub type ObjGen = u16;
    /// Offset within a file (relative to the `%PDF` marker): type alias for `u64`.
    pub type Offset = u64;
}

mod name;
pub use name::*;

mod number;
pub use number::*;

mod dict;
pub use dict::*;

mod object;
pub use object::*;

mod stream;
pub use stream::*;

mod string;

mod xref;
pub use xref::*;

mod locator;
pub use locator::*;

mod resolver;
pub use resolver::*;

mod error;
pub use error::*;

mod header;
pub use header::*;
