use strum_macros::Display;

/// Failures talking to the upstream ephemeris service.
///
/// A single request is never retried here; recovery happens only through
/// the next externally scheduled refresh cycle.
#[derive(Debug, Display)]
pub enum HorizonsError {
    /// Non-2xx answer; carries the status and the echoed response body.
    #[strum(to_string = "upstream returned status {status}")]
    Upstream { status: u16, body: String },
    #[strum(to_string = "upstream request timed out")]
    Timeout,
    #[strum(to_string = "no connection to upstream")]
    NoConnection,
    /// 2xx answer whose body could not be decoded as JSON.
    #[strum(to_string = "upstream body was not valid JSON: {0}")]
    MalformedBody(String),
    #[strum(to_string = "transport failure: {0}")]
    Transport(String),
}

impl std::error::Error for HorizonsError {}

impl From<reqwest::Error> for HorizonsError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            HorizonsError::Timeout
        } else if value.is_connect() {
            HorizonsError::NoConnection
        } else if value.is_decode() {
            HorizonsError::MalformedBody(value.to_string())
        } else {
            HorizonsError::Transport(value.to_string())
        }
    }
}
