pub mod settings;

pub use settings::{Auth, Settings, Store, Vendor};
