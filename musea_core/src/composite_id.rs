//! Composite artwork identifiers.
//!
//! An artwork is addressed across all sources as `"<source>:<nativeId>"`,
//! e.g. `"met:436532"` or `"rijks:https://id.rijksmuseum.nl/200107952"`.
//! Native IDs may themselves contain colons, so decoding splits on the
//! first colon only.

use crate::artwork::Source;
use crate::error::MuseumError;

/// Encode a `(source, nativeId)` pair into a composite identifier.
pub fn encode(source: Source, native_id: &str) -> String {
    format!("{}:{}", source.as_str(), native_id)
}

/// Decode a composite identifier back into its `(source, nativeId)` pair.
///
/// Fails with `InvalidIdentifier` when the source segment is unrecognized
/// or the native-ID segment is missing/empty. Never touches the network.
pub fn decode(id: &str) -> Result<(Source, &str), MuseumError> {
    let mut parts = id.splitn(2, ':');
    let source_part = parts.next().unwrap_or_default();
    let native_id = parts
        .next()
        .ok_or_else(|| MuseumError::InvalidIdentifier(id.to_string()))?;

    let source = Source::parse(source_part)
        .ok_or_else(|| MuseumError::InvalidIdentifier(id.to_string()))?;

    if native_id.is_empty() {
        return Err(MuseumError::InvalidIdentifier(id.to_string()));
    }

    Ok((source, native_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_round_trip() {
        for (source, native) in [
            (Source::Met, "436532"),
            (Source::Rijks, "SK-C-5"),
            (Source::Va, "O18899"),
        ] {
            let id = encode(source, native);
            assert_eq!(decode(&id).unwrap(), (source, native));
        }
    }

    #[test]
    fn test_native_id_may_contain_colons() {
        let native = "https://id.rijksmuseum.nl/200107952";
        let id = encode(Source::Rijks, native);
        assert_eq!(id, "rijks:https://id.rijksmuseum.nl/200107952");
        assert_eq!(decode(&id).unwrap(), (Source::Rijks, native));
    }

    #[test]
    fn test_missing_colon_is_invalid() {
        let err = decode("met").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
    }

    #[test]
    fn test_empty_native_id_is_invalid() {
        let err = decode("met:").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
    }

    #[test]
    fn test_unknown_source_is_invalid() {
        let err = decode("louvre:12345").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
    }
}
