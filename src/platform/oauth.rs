// src/platform/oauth.rs
// OAuth 1.0a request signing (HMAC-SHA1), enough for the four calls this
// bot makes. The signature base string and key follow RFC 5849 §3.4.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use rand::distr::Alphanumeric;
use rand::Rng;
use ring::hmac;

use crate::config::Credentials;

/// RFC 3986 percent-encoding over the unreserved set, as OAuth requires.
pub(crate) fn percent(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Build the signature base string from method, bare URL and ALL request
/// parameters (oauth_* plus query/body), percent-encoded and sorted.
pub(crate) fn signature_base(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent(k), percent(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent(url),
        percent(&param_string)
    )
}

/// HMAC-SHA1 over the base string, base64-encoded.
pub(crate) fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let signing_key = format!("{}&{}", percent(consumer_secret), percent(token_secret));
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
    let tag = hmac::sign(&key, base.as_bytes());
    B64.encode(tag.as_ref())
}

pub struct OauthSigner {
    creds: Credentials,
}

impl OauthSigner {
    pub fn new(creds: Credentials) -> Self {
        Self { creds }
    }

    /// `Authorization` header value for one request. `extra` carries the
    /// request's query/body parameters; they enter the signature but not
    /// the header.
    pub fn authorize(&self, method: &str, url: &str, extra: &[(&str, &str)]) -> String {
        let nonce: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.header(method, url, extra, &nonce, &timestamp)
    }

    fn header(
        &self,
        method: &str,
        url: &str,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth: Vec<(String, String)> = vec![
            ("oauth_consumer_key".into(), self.creds.api_key.clone()),
            ("oauth_nonce".into(), nonce.to_string()),
            ("oauth_signature_method".into(), "HMAC-SHA1".into()),
            ("oauth_timestamp".into(), timestamp.to_string()),
            ("oauth_token".into(), self.creds.access_token.clone()),
            ("oauth_version".into(), "1.0".into()),
        ];

        let mut all = oauth.clone();
        all.extend(
            extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        let base = signature_base(method, url, &all);
        let signature = sign(&base, &self.creds.api_secret, &self.creds.access_secret);

        oauth.push(("oauth_signature".into(), signature));
        oauth.sort();
        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent(k), percent(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {fields}")
    }
}
