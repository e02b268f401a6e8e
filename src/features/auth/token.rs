//! Local sanity checks on a stored bearer token. The token stays opaque to the
//! client; when it happens to be a JWT the `exp` claim is read (never verified)
//! so an already-expired session is not restored.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenCheck {
    Usable,
    Expired,
    Malformed,
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Classifies `token` against the unix timestamp `now`.
#[must_use]
pub fn inspect(token: &str, now: i64) -> TokenCheck {
    if token.is_empty() || token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return TokenCheck::Malformed;
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        // opaque token
        return TokenCheck::Usable;
    }

    let Ok(payload) = Base64UrlUnpadded::decode_vec(segments[1].trim_end_matches('=')) else {
        return TokenCheck::Malformed;
    };
    let Ok(claims) = serde_json::from_slice::<Claims>(&payload) else {
        return TokenCheck::Malformed;
    };

    match claims.exp {
        Some(exp) if exp <= now => TokenCheck::Expired,
        _ => TokenCheck::Usable,
    }
}
