//! Encoded polyline codec.
//!
//! Implements the de-facto "encoded polyline algorithm format" used by
//! mapping providers: coordinates scaled by 1e5, delta-encoded from the
//! previous point, each integer split into 5-bit groups with a continuation
//! bit, offset by 63 and emitted as printable ASCII.
//!
//! Decoding is deterministic and stateless, so it is safe to call from any
//! number of threads concurrently. Malformed input is rejected with a typed
//! [`DecodeError`] instead of reading past the end of the string; callers
//! are expected to treat a failed leg as having empty geometry rather than
//! aborting the whole view.

use crate::RoutePoint;
use thiserror::Error;

/// Scale factor of the encoding: five decimal places (~1.1 m of precision).
const PRECISION: f64 = 1e5;

/// Error produced when an encoded polyline string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string ended in the middle of a continuation sequence.
    #[error("truncated continuation sequence at byte offset {offset}")]
    TruncatedSequence { offset: usize },

    /// A byte outside the printable range of the encoding was encountered.
    #[error("invalid byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    /// A continuation sequence ran long enough to overflow the value range.
    #[error("value overflow in continuation sequence ending at offset {offset}")]
    ValueOverflow { offset: usize },
}

/// Decode an encoded polyline string into an ordered coordinate sequence.
///
/// An empty string decodes to an empty sequence; that is the defined
/// representation of "no geometry", not an error. Output order matches
/// input order and repeated calls on the same string yield equal results.
///
/// # Errors
///
/// Returns [`DecodeError`] when the string is truncated mid-value or
/// contains bytes outside the encoding's printable range.
///
/// # Example
/// ```
/// use route_viz::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat - 38.5).abs() < 1e-5);
/// assert!((points[0].lng - -120.2).abs() < 1e-5);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<RoutePoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut offset = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while offset < bytes.len() {
        let (dlat, next) = decode_value(bytes, offset)?;
        let (dlng, next) = decode_value(bytes, next)?;
        offset = next;
        lat += dlat;
        lng += dlng;
        points.push(RoutePoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// Decode an optional polyline field from fetched data.
///
/// Absent geometry (`None`) decodes to an empty sequence, matching the
/// behavior of [`decode`] on an empty string.
pub fn decode_opt(encoded: Option<&str>) -> Result<Vec<RoutePoint>, DecodeError> {
    match encoded {
        Some(s) => decode(s),
        None => Ok(Vec::new()),
    }
}

/// Encode a coordinate sequence into the compact polyline format.
///
/// Coordinates are rounded to the encoding's 1e5 precision, so
/// `decode(&encode(points))` reproduces `points` within 1e-5 per component
/// but encode-then-decode is not bit-exact for arbitrary floats.
///
/// # Example
/// ```
/// use route_viz::{polyline::{decode, encode}, RoutePoint};
///
/// let points = vec![RoutePoint::new(38.5, -120.2), RoutePoint::new(40.7, -120.95)];
/// let decoded = decode(&encode(&points)).unwrap();
/// assert!((decoded[1].lat - 40.7).abs() < 1e-5);
/// ```
pub fn encode(points: &[RoutePoint]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for p in points {
        let lat = (p.lat * PRECISION).round() as i64;
        let lng = (p.lng * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Decode one signed value starting at `offset`, returning the value and
/// the offset just past its last byte.
fn decode_value(bytes: &[u8], mut offset: usize) -> Result<(i64, usize), DecodeError> {
    let mut result = 0u64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(offset) else {
            return Err(DecodeError::TruncatedSequence { offset });
        };
        if !(63..=127).contains(&byte) {
            return Err(DecodeError::InvalidByte { byte, offset });
        }
        if shift > 60 {
            return Err(DecodeError::ValueOverflow { offset });
        }

        let chunk = u64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        offset += 1;

        if chunk < 0x20 {
            break;
        }
    }

    // Low bit carries the sign: odd means negative, stored as ~(value << 1).
    let magnitude = (result >> 1) as i64;
    let value = if result & 1 == 1 { -magnitude - 1 } else { magnitude };
    Ok((value, offset))
}

/// Append one signed value in zig-zag 5-bit-chunk form.
fn encode_value(value: i64, out: &mut String) {
    let shifted = value << 1;
    let mut v = (if value < 0 { !shifted } else { shifted }) as u64;

    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f) as u8) + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // Canonical fixture from the encoding's reference documentation.
    const FIXTURE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn test_decode_empty_is_empty() {
        assert_eq!(decode("").unwrap(), vec![]);
        assert_eq!(decode_opt(None).unwrap(), vec![]);
    }

    #[test]
    fn test_decode_reference_fixture() {
        let points = decode(FIXTURE).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(points.len(), expected.len());
        for (p, (lat, lng)) in points.iter().zip(expected) {
            assert!(approx_eq(p.lat, lat, 1e-5));
            assert!(approx_eq(p.lng, lng, 1e-5));
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        assert_eq!(decode(FIXTURE).unwrap(), decode(FIXTURE).unwrap());
    }

    #[test]
    fn test_decode_single_point() {
        let encoded = encode(&[RoutePoint::new(51.5074, -0.1278)]);
        let points = decode(&encoded).unwrap();
        assert_eq!(points.len(), 1);
        assert!(approx_eq(points[0].lat, 51.5074, 1e-5));
        assert!(approx_eq(points[0].lng, -0.1278, 1e-5));
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        // Drop the final byte so the last value never terminates.
        let truncated = &FIXTURE[..FIXTURE.len() - 1];
        match decode(truncated) {
            Err(DecodeError::TruncatedSequence { .. }) => {}
            other => panic!("expected TruncatedSequence, got {other:?}"),
        }
    }

    #[test]
    fn test_odd_value_count_is_rejected() {
        // One complete value with no longitude to pair it with.
        assert!(matches!(
            decode("_p~iF"),
            Err(DecodeError::TruncatedSequence { .. })
        ));
    }

    #[test]
    fn test_out_of_range_byte_is_rejected() {
        match decode("_p~iF\t~ps|U") {
            Err(DecodeError::InvalidByte { byte: b'\t', .. }) => {}
            other => panic!("expected InvalidByte, got {other:?}"),
        }
    }

    #[test]
    fn test_runaway_continuation_is_rejected() {
        // Every byte keeps the continuation bit set.
        let runaway: String = std::iter::repeat('\x7f').take(20).collect();
        assert!(matches!(
            decode(&runaway),
            Err(DecodeError::ValueOverflow { .. })
        ));
    }

    #[test]
    fn test_round_trip_within_precision() {
        let points = vec![
            RoutePoint::new(51.5074, -0.1278),
            RoutePoint::new(48.8566, 2.3522),
            RoutePoint::new(-33.8688, 151.2093),
            RoutePoint::new(0.0, 0.0),
            RoutePoint::new(-0.00001, 0.00001),
        ];

        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), points.len());
        for (d, p) in decoded.iter().zip(&points) {
            assert!(approx_eq(d.lat, p.lat, 1e-5));
            assert!(approx_eq(d.lng, p.lng, 1e-5));
        }
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
    }
}
