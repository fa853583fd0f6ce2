use serde::{de, Deserialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

/// Deserializes a `u64` given as a `0x` prefixed hex string, a decimal
/// string or a plain JSON number.
pub fn deserialize_str_as_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: de::Deserializer<'de>,
{
    let string = match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => return Ok(n),
        StringOrNumber::String(string) => string,
    };

    if let Some(stripped) = string.strip_prefix("0x") {
        u64::from_str_radix(stripped, 16)
    } else {
        string.parse()
    }
    .map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Deserialize)]
    struct Nonce {
        #[serde(deserialize_with = "deserialize_str_as_u64")]
        nonce: u64,
    }

    #[rstest]
    #[case(r#"{"nonce":"0x10"}"#, 16)]
    #[case(r#"{"nonce":"0x00"}"#, 0)]
    #[case(r#"{"nonce":"42"}"#, 42)]
    #[case(r#"{"nonce":7}"#, 7)]
    fn accepts_hex_decimal_and_numbers(#[case] json: &str, #[case] expected: u64) {
        let parsed: Nonce = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.nonce, expected);
    }

    #[rstest]
    #[case(r#"{"nonce":"0xzz"}"#)]
    #[case(r#"{"nonce":"ten"}"#)]
    #[case(r#"{"nonce":-1}"#)]
    fn rejects_malformed(#[case] json: &str) {
        assert!(serde_json::from_str::<Nonce>(json).is_err());
    }
}
