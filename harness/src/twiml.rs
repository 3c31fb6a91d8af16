use once_cell::sync::Lazy;
use regex::Regex;

/// Tag the server emits when it serves synthesised audio.
const PLAY_TAG: &str = "<Play>";
/// Tag the server emits when it falls back to Twilio's built-in voice.
const SAY_TAG: &str = "<Say>";

static GATHER_TIMEOUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"timeout="([^"]*)""#).unwrap());
static SPEECH_TIMEOUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"speechTimeout="([^"]*)""#).unwrap());

/// Everything the baseline reads out of a gather response body.
///
/// This is a shallow inspection of the raw markup, not a TwiML parse. Tag counts are literal
/// substring counts and the timeout attributes are taken from their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwimlBreakdown {
    /// Synthesised audio segments served via `<Play>`
    pub tts_instances: usize,
    /// Fallback text-to-speech segments served via `<Say>`
    pub fallback_instances: usize,
    /// The gather `timeout` attribute, if present
    pub gather_timeout: Option<String>,
    /// The `speechTimeout` attribute, if present
    pub speech_timeout: Option<String>,
    /// Whether the body mentions `error` anywhere, case-insensitively
    ///
    /// Advisory only. The server can return a well-formed TwiML reply that apologises for an
    /// internal problem, which this flags without failing the scenario.
    pub has_error_marker: bool,
}

/// Inspect a gather response body.
pub fn inspect(body: &str) -> TwimlBreakdown {
    TwimlBreakdown {
        tts_instances: body.matches(PLAY_TAG).count(),
        fallback_instances: body.matches(SAY_TAG).count(),
        gather_timeout: first_capture(&GATHER_TIMEOUT_RE, body),
        speech_timeout: first_capture(&SPEECH_TIMEOUT_RE, body),
        has_error_marker: body.to_lowercase().contains("error"),
    }
}

fn first_capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body).map(|captures| captures[1].to_string())
}
