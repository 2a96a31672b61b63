mod duration_service;
mod lock_service;
mod passcode_service;
mod vendor_service;

pub use duration_service::*;
pub use lock_service::*;
pub use passcode_service::*;
pub use vendor_service::*;
