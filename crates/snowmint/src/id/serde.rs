use super::SnowflakeId;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

impl Serialize for SnowflakeId {
    /// Serializes as the native integer.
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(s)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    /// Deserializes from the native integer, rejecting values with the
    /// reserved bit set.
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(d)?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(de::Error::custom(format!(
                "snowflake id {raw} has the reserved bit set"
            )));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_integer() {
        let id = SnowflakeId::from_parts(5, 7, 1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.to_raw().to_string());
        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn rejects_reserved_bit() {
        let json = (1u64 << 63).to_string();
        assert!(serde_json::from_str::<SnowflakeId>(&json).is_err());
    }
}
