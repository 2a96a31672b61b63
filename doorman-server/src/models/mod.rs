mod device;
mod lock;
mod status;

pub use device::{Device, GARAGE_OPENER};
pub use lock::LockEntry;
pub use status::DeviceStatus;
