pub mod codec;
pub mod error;
pub mod options;
pub mod protocol;
pub mod types;

pub use codec::*;
pub use error::*;
pub use options::*;
pub use protocol::*;
pub use types::*;
