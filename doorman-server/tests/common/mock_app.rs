use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use time::OffsetDateTime;
use tokio::net::TcpListener;

use doorman_mock::sim::{SimDevice, VendorSim};
use doorman_server::app::create_app;
use doorman_server::configs::settings::{Auth, Logger, Server, Settings, Store, Vendor};

pub const PASSCODE: &str = "1234";
pub const VENDOR_USERNAME: &str = "owner@example.com";
pub const VENDOR_PASSWORD: &str = "hunter2";

pub struct MockApp {
    pub router: Router,
    pub sim: Arc<VendorSim>,
    _store_dir: TempDir,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_credentials(VENDOR_USERNAME, VENDOR_PASSWORD).await
    }

    /// Spawn the simulated vendor cloud on an ephemeral port and wire a
    /// fresh app against it. The simulator accepts `VENDOR_USERNAME` and
    /// `VENDOR_PASSWORD`; the app is configured with whatever is passed
    /// here, so mismatched credentials exercise the login failure path.
    pub async fn with_credentials(username: &str, password: &str) -> Self {
        let sim = Arc::new(VendorSim::new(VENDOR_USERNAME, VENDOR_PASSWORD));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let vendor_url = format!("http://{}", listener.local_addr().unwrap());

        let vendor_app = doorman_mock::create_app(sim.clone());
        tokio::spawn(async move {
            axum::serve(listener, vendor_app).await.unwrap();
        });

        let store_dir = TempDir::new().unwrap();

        let settings = Arc::new(Settings {
            server: Server {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            logger: Logger {
                level: "debug".to_string(),
            },
            vendor: Vendor {
                url: vendor_url,
                username: username.to_string(),
                password: password.to_string(),
            },
            auth: Auth {
                passcode: PASSCODE.to_string(),
            },
            store: Store {
                path: store_dir.path().join("locks.json").display().to_string(),
            },
        });

        Self {
            router: create_app(&settings),
            sim,
            _store_dir: store_dir,
        }
    }

    pub fn with_garage(self, state: &str, last_update: Option<OffsetDateTime>) -> Self {
        self.with_device("Garage", "virtualgaragedooropener", state, last_update)
    }

    pub fn with_device(
        self,
        name: &str,
        device_type: &str,
        state: &str,
        last_update: Option<OffsetDateTime>,
    ) -> Self {
        self.sim.push_device(SimDevice {
            name: name.to_string(),
            device_type: device_type.to_string(),
            door_state: state.to_string(),
            last_update,
        });
        self
    }
}
