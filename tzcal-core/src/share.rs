//! Share links.
//!
//! A link carries an event's title, date, time and timezone as base64 JSON
//! in its `event` query parameter. Opening it only fills in a new event form;
//! nothing is added to the store until the form is submitted.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use url::Url;

use crate::error::{TzCalError, TzCalResult};
use crate::event::{Event, EventDraft};

/// Query parameter holding the token.
pub const SHARE_PARAM: &str = "event";

/// Pack the shareable fields into a URL-safe token.
pub fn encode(draft: &EventDraft) -> TzCalResult<String> {
    let json = serde_json::to_vec(draft).map_err(|e| TzCalError::Serialization(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Unpack a token. Padded standard base64 (older links) is accepted too.
pub fn decode(token: &str) -> TzCalResult<EventDraft> {
    let token = token.trim();
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| STANDARD.decode(token))
        .map_err(|e| TzCalError::Decode(format!("not base64: {}", e)))?;

    serde_json::from_slice(&bytes).map_err(|e| TzCalError::Decode(format!("bad event data: {}", e)))
}

/// `base` with its query replaced by the event's token.
pub fn share_url(base: &str, event: &Event) -> TzCalResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| TzCalError::Config(format!("Invalid share base URL '{}': {}", base, e)))?;
    let token = encode(&event.draft())?;

    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(SHARE_PARAM, &token);

    Ok(url)
}

/// Pull the token out of a share link, or treat `input` as a bare token.
pub fn decode_link(input: &str) -> TzCalResult<EventDraft> {
    match Url::parse(input.trim()) {
        Ok(url) => {
            let token = url
                .query_pairs()
                .find(|(key, _)| key == SHARE_PARAM)
                .map(|(_, value)| value.into_owned())
                .ok_or_else(|| TzCalError::Decode(format!("no '{}' parameter", SHARE_PARAM)))?;
            decode(&token)
        }
        Err(_) => decode(input),
    }
}

/// Draft to pre-fill the new event form with. A bad link just means an
/// empty form.
pub fn prefill_from_link(input: &str) -> Option<EventDraft> {
    match decode_link(input) {
        Ok(draft) => Some(draft),
        Err(e) => {
            tracing::warn!("Invalid event data in link: {}", e);
            None
        }
    }
}
