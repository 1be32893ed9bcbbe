//! Share tokens: a whole project packed into one URL-safe string.
//!
//! The token is the project's JSON, zlib-compressed at the best level and
//! encoded as URL-safe base64 without padding. It fits in a query parameter
//! and decodes back to the same [`ColorConfig`].

use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::ShareError;
use crate::project::ColorConfig;

/// Packs a project into a share token.
pub fn encode_state(config: &ColorConfig) -> Result<String, ShareError> {
    let json = serde_json::to_vec(config)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json).map_err(ShareError::Compression)?;
    let compressed = encoder.finish().map_err(ShareError::Compression)?;
    debug!(json = json.len(), compressed = compressed.len(), "encoded share token");
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Unpacks a share token. Trailing `=` padding is accepted.
pub fn decode_state(token: &str) -> Result<ColorConfig, ShareError> {
    let trimmed = token.trim().trim_end_matches('=');
    let compressed = URL_SAFE_NO_PAD.decode(trimmed)?;

    let mut json = String::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_string(&mut json)
        .map_err(ShareError::Compression)?;

    let config: ColorConfig = serde_json::from_str(&json)?;
    if config.light.is_empty() || config.dark.is_empty() {
        return Err(ShareError::EmptyPalette);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ColorSet;

    fn sample() -> ColorConfig {
        let mut config = ColorConfig {
            light: vec!["#E11D48".into(), "#2563EB".into()],
            dark: vec!["#FB7185".into(), "#60A5FA".into()],
            strict_mode: true,
            ..ColorConfig::default()
        };
        config.names.insert("#E11D48".into(), "brand".into());
        config.sets.push(ColorSet {
            id: "set-1".into(),
            name: "Accents".into(),
            size: 3,
            light: vec!["#16A34A".into()],
            dark: vec!["#4ADE80".into()],
            strict_mode: false,
        });
        config
    }

    fn token_for(json: &str) -> String {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(json.as_bytes()).unwrap();
        URL_SAFE_NO_PAD.encode(encoder.finish().unwrap())
    }

    #[test]
    fn round_trips_a_project() {
        let config = sample();
        let token = encode_state(&config).unwrap();
        assert_eq!(decode_state(&token).unwrap(), config);
    }

    #[test]
    fn token_is_url_safe() {
        let token = encode_state(&sample()).unwrap();
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }

    #[test]
    fn padded_token_is_accepted() {
        let token = encode_state(&sample()).unwrap();
        let padded = format!("{}==", token);
        assert_eq!(decode_state(&padded).unwrap(), sample());
    }

    #[test]
    fn decodes_minimal_state() {
        let token = token_for(r##"{"light":["#111111"],"dark":["#EEEEEE"]}"##);
        let config = decode_state(&token).unwrap();
        assert_eq!(config.light, vec!["#111111"]);
        assert_eq!(config.default_set_name, "Default Set");
    }

    #[test]
    fn rejects_empty_palette() {
        let token = token_for(r##"{"light":[],"dark":["#EEEEEE"]}"##);
        assert!(matches!(decode_state(&token), Err(ShareError::EmptyPalette)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode_state("!!!"), Err(ShareError::Base64(_))));
        let not_zlib = URL_SAFE_NO_PAD.encode(b"plain text");
        assert!(matches!(
            decode_state(&not_zlib),
            Err(ShareError::Compression(_))
        ));
        let not_config = token_for("[1, 2, 3]");
        assert!(matches!(decode_state(&not_config), Err(ShareError::Json(_))));
    }
}
