pub mod block;
pub mod constants;
pub mod diagnostic;
pub mod registry;
pub mod sequence;

pub use block::{Block, BlockKind};
pub use constants::ArityError;
pub use registry::{Registry, register_all_blocks};
pub use sequence::{Entry, InvalidLine, LineErrorKind, Sequence};
