pub mod policy;
pub mod response;
pub mod segment;
pub mod transcript;

pub use policy::*;
pub use response::*;
pub use segment::*;
pub use transcript::*;
