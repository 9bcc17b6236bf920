use super::common::HorizonsError;
use super::http_client::HTTPClient;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// A vector-table ephemeris query for one body over a one-minute window.
///
/// The upstream protocol quotes most values in literal single quotes
/// inside the query string; that convention is preserved exactly, with
/// percent-encoding left to the URL serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorRequest {
    command_code: String,
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
}

impl VectorRequest {
    /// Builds a request for the minute beginning at `start`.
    ///
    /// The stop time is pinned one minute after the start so that the
    /// one-minute step always yields at least one sample point.
    pub fn for_minute(command_code: &str, start: DateTime<Utc>) -> Self {
        Self {
            command_code: command_code.to_string(),
            start,
            stop: start + TimeDelta::minutes(1),
        }
    }

    /// RFC 3339 timestamp with milliseconds, as the upstream expects and
    /// as the cache uses for key construction.
    pub fn wire_timestamp(t: DateTime<Utc>) -> String {
        t.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn query_params(&self) -> [(&'static str, String); 9] {
        [
            ("format", "json".into()),
            ("COMMAND", format!("'{}'", self.command_code)),
            ("EPHEM_TYPE", "VECTORS".into()),
            // Heliocentric: site 500 at the Sun's center.
            ("CENTER", "'500@10'".into()),
            ("START_TIME", format!("'{}'", Self::wire_timestamp(self.start))),
            ("STOP_TIME", format!("'{}'", Self::wire_timestamp(self.stop))),
            ("STEP_SIZE", "'1 m'".into()),
            ("VEC_TABLE", "1".into()),
            ("OUT_UNITS", "'KM-S'".into()),
        ]
    }

    /// Issues the request and returns the decoded JSON document.
    ///
    /// Non-2xx answers surface as [`HorizonsError::Upstream`] with the
    /// response body echoed for the caller; nothing is retried.
    pub async fn send(&self, client: &HTTPClient) -> Result<serde_json::Value, HorizonsError> {
        let response = client
            .client()
            .get(client.url())
            .query(&self.query_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HorizonsError::Upstream { status: status.as_u16(), body });
        }
        Ok(response.json::<serde_json::Value>().await?)
    }
}
