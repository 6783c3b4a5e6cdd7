pub(crate) mod cc;
mod source;
mod op;
mod xref;
mod fp;

pub use source::{ByteSource, ByteCursor};
pub use op::ObjParser;
pub use fp::FileParser;
