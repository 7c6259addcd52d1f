//! Vote-count codec.
//!
//! A reversible textual obfuscation of a single number. The token is the
//! literal prefix `FHE-` followed by the standard (padded) base64 of the
//! value's decimal rendering. This is NOT encryption: anyone holding a token
//! can decode it. The scheme stands in for a homomorphic ciphertext so the
//! storage and disclosure plumbing can be exercised end to end.
//!
//! Tokens without the prefix are parsed as plain numbers, which keeps records
//! written before the codec existed readable.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Literal prefix carried by every encoded token.
pub const TOKEN_PREFIX: &str = "FHE-";

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Token could not be turned back into a finite number.
    #[error("Cannot decode vote token: {0}")]
    Decode(String),
}

/// Encode a vote count into an `FHE-` token.
///
/// Integral values render without a fractional part, so `42.0` becomes
/// `FHE-NDI=` (base64 of `"42"`). See [`render_decimal`] for the exact text.
pub fn encode(value: f64) -> String {
    format!("{}{}", TOKEN_PREFIX, STANDARD.encode(render_decimal(value)))
}

/// Decimal text carried inside a token.
///
/// Shortest round-trip digits, laid out like ECMAScript `Number::toString`
/// so tokens match those written by browser clients: plain notation for
/// `1e-6 <= |v| < 1e21`, otherwise `d.ddde+N` / `de-N`. Negative zero
/// renders as `0`.
pub fn render_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. `1.2345e3`
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Decode a token produced by [`encode`], or a bare decimal number.
pub fn decode(token: &str) -> Result<f64, CodecError> {
    let text = match token.strip_prefix(TOKEN_PREFIX) {
        Some(payload) => {
            let bytes = STANDARD
                .decode(payload)
                .map_err(|e| CodecError::Decode(format!("invalid base64 payload: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|_| CodecError::Decode("payload is not UTF-8".to_string()))?
        }
        None => token.to_string(),
    };

    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| CodecError::Decode(format!("'{}' is not a number", text)))?;

    if !value.is_finite() {
        return Err(CodecError::Decode(format!("'{}' is not finite", text)));
    }

    Ok(value)
}

/// Whether a token carries the codec prefix.
pub fn is_encoded(token: &str) -> bool {
    token.starts_with(TOKEN_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_value() {
        assert_eq!(encode(42.0), "FHE-NDI=");
        assert_eq!(encode(0.0), "FHE-MA==");
    }

    #[test]
    fn test_render_decimal_plain_range() {
        assert_eq!(render_decimal(42.0), "42");
        assert_eq!(render_decimal(-1.5), "-1.5");
        assert_eq!(render_decimal(123.456), "123.456");
        assert_eq!(render_decimal(0.000001), "0.000001");
        assert_eq!(render_decimal(1e20), "100000000000000000000");
        assert_eq!(render_decimal(-0.0), "0");
    }

    #[test]
    fn test_render_decimal_exponent_range() {
        assert_eq!(render_decimal(1e21), "1e+21");
        assert_eq!(render_decimal(1.5e22), "1.5e+22");
        assert_eq!(render_decimal(1e-7), "1e-7");
        assert_eq!(render_decimal(-2.5e-8), "-2.5e-8");
        assert_eq!(render_decimal(f64::MAX), "1.7976931348623157e+308");
    }

    #[test]
    fn test_extreme_magnitudes_roundtrip() {
        assert_eq!(encode(1e21), format!("{}{}", TOKEN_PREFIX, STANDARD.encode("1e+21")));
        assert_eq!(encode(-0.0), encode(0.0));
        for value in [1e21, 1.5e22, 1e-7, f64::MIN_POSITIVE, f64::MAX] {
            assert_eq!(decode(&encode(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode(1234.5), encode(1234.5));
    }

    #[test]
    fn test_decode_prefixed_token() {
        assert_eq!(decode("FHE-NDI=").unwrap(), 42.0);
    }

    #[test]
    fn test_decode_fractional_value() {
        let token = encode(17.25);
        assert!(is_encoded(&token));
        assert_eq!(decode(&token).unwrap(), 17.25);
    }

    #[test]
    fn test_decode_bare_number_fallback() {
        assert_eq!(decode("128").unwrap(), 128.0);
        assert_eq!(decode("3.5").unwrap(), 3.5);
        assert!(!is_encoded("128"));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let result = decode("FHE-***");
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_non_numeric_payload() {
        let token = format!("{}{}", TOKEN_PREFIX, STANDARD.encode("forty-two"));
        assert!(matches!(decode(&token), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_non_numeric_bare_token() {
        assert!(decode("votes").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_non_finite() {
        let token = format!("{}{}", TOKEN_PREFIX, STANDARD.encode("NaN"));
        assert!(decode(&token).is_err());
        assert!(decode("inf").is_err());
    }

    #[test]
    fn test_decode_error_display() {
        let err = decode("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot decode vote token: 'nope' is not a number"
        );
    }

    proptest! {
        #[test]
        fn prop_roundtrip_non_negative_integers(v in 0u64..(1u64 << 53)) {
            let value = v as f64;
            prop_assert_eq!(decode(&encode(value)).unwrap(), value);
        }

        #[test]
        fn prop_roundtrip_finite_floats(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            prop_assert_eq!(decode(&encode(v)).unwrap(), v);
        }

        #[test]
        fn prop_token_always_prefixed(v in 0u32..u32::MAX) {
            prop_assert!(encode(v as f64).starts_with(TOKEN_PREFIX));
        }
    }
}
