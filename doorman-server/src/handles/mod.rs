mod control_handle;
mod site_handle;
mod status_handle;

pub use control_handle::*;
pub use site_handle::*;
pub use status_handle::*;
