use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::configs::settings::Vendor;
use crate::errors::VendorError;
use crate::models::Device;

#[derive(Debug, Deserialize)]
struct DevicesResponse {
    devices: Vec<Device>,
}

/// Adapter over the vendor cloud API. Every public operation authenticates
/// afresh; no session state is kept between requests.
#[derive(Clone)]
pub struct VendorService {
    vendor: Vendor,
    client: reqwest::Client,
}

impl VendorService {
    pub fn new(vendor: Vendor) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { vendor, client }
    }

    async fn authenticate(&self) -> Result<String, VendorError> {
        let response = self
            .client
            .post(format!("{}/api/login", self.vendor.url))
            .json(&json!({
                "username": self.vendor.username,
                "password": self.vendor.password,
            }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "Login rejected by the vendor".to_string());

            return Err(VendorError::InvalidCredentials(message));
        }

        let body: Value = response.error_for_status()?.json().await?;

        body.get("security_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                VendorError::UnexpectedResponse("login response missing security_token".to_string())
            })
    }

    async fn fetch_devices(&self, token: &str) -> Result<Vec<Device>, VendorError> {
        let response = self
            .client
            .get(format!("{}/api/devices", self.vendor.url))
            .header("SecurityToken", token)
            .send()
            .await?
            .error_for_status()?;

        let body: DevicesResponse = response.json().await?;

        Ok(body.devices)
    }

    /// All devices the vendor reports, or only those whose name equals the
    /// non-empty filter (case-insensitive). No match is an empty list, not
    /// an error.
    pub async fn list_devices(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Device>, VendorError> {
        let token = self.authenticate().await?;
        let devices = self.fetch_devices(&token).await?;

        match name_filter {
            Some(filter) if !filter.is_empty() => Ok(devices
                .into_iter()
                .filter(|device| device.name.to_lowercase() == filter.to_lowercase())
                .collect()),
            _ => Ok(devices),
        }
    }

    /// Command the named device (case-insensitive) to open or close.
    /// Returns whether a device matched and was commanded.
    pub async fn set_device_state(&self, name: &str, close: bool) -> Result<bool, VendorError> {
        let token = self.authenticate().await?;
        let devices = self.fetch_devices(&token).await?;

        let Some(device) = devices
            .into_iter()
            .find(|device| device.name.to_lowercase() == name.to_lowercase())
        else {
            return Ok(false);
        };

        let action = if close { "close" } else { "open" };

        self.client
            .put(format!(
                "{}/api/devices/{}/actions",
                self.vendor.url, device.name
            ))
            .header("SecurityToken", &token)
            .json(&json!({ "action": action }))
            .send()
            .await?
            .error_for_status()?;

        Ok(true)
    }
}

/// Parse a vendor "last changed" timestamp into a UTC instant.
///
/// Only the first 26 characters are considered, enough for microsecond
/// precision; a zone letter pushed past that boundary is simply dropped.
/// The `Z`-suffixed shape is tried first, then the bare one.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let clipped = raw.get(..26).unwrap_or(raw);

    let with_zone =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]Z");
    let without_zone =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

    PrimitiveDateTime::parse(clipped, with_zone)
        .or_else(|_| PrimitiveDateTime::parse(clipped, without_zone))
        .map(|parsed| parsed.assume_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_parse_timestamp_with_zone_suffix() {
        let parsed = parse_timestamp("2024-01-02T03:04:05.123Z").unwrap();

        assert_eq!(parsed, datetime!(2024-01-02 03:04:05.123 UTC));
    }

    #[test]
    fn test_parse_timestamp_clips_microseconds_and_zone() {
        // 27 characters: the trailing Z falls outside the clipped window.
        let parsed = parse_timestamp("2024-01-02T03:04:05.123456Z").unwrap();

        assert_eq!(parsed, datetime!(2024-01-02 03:04:05.123456 UTC));
    }

    #[test]
    fn test_parse_timestamp_rejects_other_shapes() {
        assert!(parse_timestamp("2024-01-02 03:04:05").is_err());
        assert!(parse_timestamp("last tuesday").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
