use crate::probe::ProbeCandidate;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use korto_core::ShortCode;

/// Encodes `bytes` as unpadded URL-safe base64.
///
/// Any `/` or `+` left by the alphabet is replaced by `_` and `-`
/// respectively. Inputs of any width are accepted; 8 bytes produce
/// [`SHORT_CODE_LEN`](korto_core::SHORT_CODE_LEN) characters.
pub fn encode(bytes: &[u8]) -> String {
    replace_unsafe_chars(URL_SAFE_NO_PAD.encode(bytes))
}

/// Encodes a probe candidate into its short code.
pub fn encode_candidate(candidate: &ProbeCandidate) -> ShortCode {
    ShortCode::new_unchecked(encode(candidate.as_bytes()))
}

fn replace_unsafe_chars(code: String) -> String {
    if !code.contains(['/', '+']) {
        return code;
    }
    code.replace('/', "_").replace('+', "-")
}
