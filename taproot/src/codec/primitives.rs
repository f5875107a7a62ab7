//! Scalar codecs: biased single-character integers, length-prefixed text,
//! raw characters, and decimal wide integers.

use crate::codec::{Codec, DecodeCursor};
use crate::error::{Error, Result};

/// Bias added to a value before mapping it onto a code point.
const BIAS: i32 = 64;

/// Smallest value [`SmallInt`] can represent.
pub const SMALL_INT_MIN: i32 = -32;
/// Largest value [`SmallInt`] can represent. `SMALL_INT_MAX + BIAS` stays
/// below the surrogate range, so every in-domain value maps to a valid char.
pub const SMALL_INT_MAX: i32 = 34_464;

/// One value, one character: `value + 64` as a code point.
///
/// The workhorse of the continuation format; child indices, attempt
/// counters, lengths, and map sizes all go through it.
pub struct SmallInt;

impl Codec for SmallInt {
    type Value = i32;

    fn encode(&self, value: &i32, out: &mut String) -> Result<()> {
        if !(SMALL_INT_MIN..=SMALL_INT_MAX).contains(value) {
            return Err(Error::range(format!(
                "{value} is not in {SMALL_INT_MIN}..={SMALL_INT_MAX}"
            )));
        }
        let ch = char::from_u32((value + BIAS) as u32)
            .ok_or_else(|| Error::range(format!("{value} does not map onto a code point")))?;
        out.push(ch);
        Ok(())
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<i32> {
        let ch = cursor.take_one()?;
        let value = ch as i64 - i64::from(BIAS);
        if value < i64::from(SMALL_INT_MIN) || value > i64::from(SMALL_INT_MAX) {
            return Err(Error::decoding(format!(
                "character {ch:?} is outside the small-integer domain"
            )));
        }
        Ok(value as i32)
    }
}

/// Character count as a [`SmallInt`], then the raw characters.
pub struct Text;

impl Codec for Text {
    type Value = String;

    fn encode(&self, value: &String, out: &mut String) -> Result<()> {
        let count = value.chars().count();
        if count > SMALL_INT_MAX as usize {
            return Err(Error::range(format!(
                "text of {count} characters exceeds the length prefix domain"
            )));
        }
        SmallInt.encode(&(count as i32), out)?;
        out.push_str(value);
        Ok(())
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<String> {
        let count = SmallInt.decode(cursor)?;
        if count < 0 {
            return Err(Error::decoding(format!("negative text length {count}")));
        }
        Ok(cursor.take(count as usize)?.iter().collect())
    }
}

/// A single character, verbatim.
pub struct Glyph;

impl Codec for Glyph {
    type Value = char;

    fn encode(&self, value: &char, out: &mut String) -> Result<()> {
        out.push(*value);
        Ok(())
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<char> {
        cursor.take_one()
    }
}

/// An `i64` as a [`Text`]-wrapped decimal literal, for values outside the
/// [`SmallInt`] domain.
pub struct WideInt;

impl Codec for WideInt {
    type Value = i64;

    fn encode(&self, value: &i64, out: &mut String) -> Result<()> {
        Text.encode(&value.to_string(), out)
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<i64> {
        let literal = Text.decode(cursor)?;
        literal
            .parse()
            .map_err(|_| Error::decoding(format!("invalid integer literal {literal:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_from_str, encode_to_string};
    use rstest::rstest;

    #[rstest]
    #[case(0, "@")]
    #[case(-32, " ")]
    #[case(1, "A")]
    #[case(100, "¤")]
    #[case(34_464, "蛠")]
    fn small_int_round_trips_with_known_encodings(#[case] value: i32, #[case] encoded: &str) {
        assert_eq!(encode_to_string(&SmallInt, &value).expect("encode"), encoded);
        assert_eq!(decode_from_str(&SmallInt, encoded).expect("decode"), value);
    }

    #[rstest]
    #[case(-33)]
    #[case(34_465)]
    #[case(100_000)]
    fn small_int_rejects_out_of_domain_values(#[case] value: i32) {
        let err = encode_to_string(&SmallInt, &value).expect_err("out of domain");
        assert!(matches!(err, Error::EncodingRange(_)));
    }

    #[test]
    fn small_int_rejects_out_of_domain_characters_on_decode() {
        let err = decode_from_str(&SmallInt, "\u{1}").expect_err("below domain");
        assert!(matches!(err, Error::DecodingFormat(_)));
        let err = decode_from_str(&SmallInt, "\u{86E1}").expect_err("above domain");
        assert!(matches!(err, Error::DecodingFormat(_)));
    }

    #[rstest]
    #[case("", "@")]
    #[case("!", "A!")]
    #[case("ada", "Cada")]
    #[case("0718蛠n2", "G0718蛠n2")]
    fn text_round_trips_with_known_encodings(#[case] value: &str, #[case] encoded: &str) {
        assert_eq!(
            encode_to_string(&Text, &value.to_string()).expect("encode"),
            encoded
        );
        assert_eq!(decode_from_str(&Text, encoded).expect("decode"), value);
    }

    #[test]
    fn text_prefix_counts_characters_not_bytes() {
        let value = "蛠蛠".to_string();
        let encoded = encode_to_string(&Text, &value).expect("encode");
        assert_eq!(encoded.chars().next(), Some('B'));
        assert_eq!(decode_from_str(&Text, &encoded).expect("decode"), value);
    }

    #[test]
    fn truncated_text_is_a_decoding_error() {
        // Declares three characters but carries two.
        let err = decode_from_str(&Text, "Cad").expect_err("truncated");
        assert!(matches!(err, Error::DecodingFormat(_)));
    }

    #[test]
    fn wide_int_round_trips_values_outside_the_small_domain() {
        for value in [i64::MIN, -54_854, 0, 1_000_000, i64::MAX] {
            let encoded = encode_to_string(&WideInt, &value).expect("encode");
            assert_eq!(decode_from_str(&WideInt, &encoded).expect("decode"), value);
        }
    }

    #[test]
    fn wide_int_rejects_non_numeric_literals() {
        let err = decode_from_str(&WideInt, "Cabc").expect_err("not a number");
        assert!(matches!(err, Error::DecodingFormat(_)));
    }

    #[test]
    fn glyph_round_trips_a_single_character() {
        assert_eq!(encode_to_string(&Glyph, &'c').expect("encode"), "c");
        assert_eq!(decode_from_str(&Glyph, "蛠").expect("decode"), '蛠');
    }
}
