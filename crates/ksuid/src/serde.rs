use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde support for [`crate::Ksuid`] fields as base62 strings.
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use ksuid::Ksuid;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "ksuid::as_base62")]
///     id: Ksuid,
/// }
/// # }
/// ```
pub mod as_base62 {
    use super::*;
    use crate::Ksuid;

    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base62Visitor;

        impl serde::de::Visitor<'_> for Base62Visitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 27-character base62 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ksuid::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Base62Visitor)
    }
}

/// Serde support for [`crate::Ksuid`] fields as raw epoch-relative
/// timestamps plus payload, for callers that store the two halves
/// separately.
pub mod as_parts {
    use super::*;
    use crate::Ksuid;

    #[derive(Serialize, Deserialize)]
    struct Parts {
        timestamp: u32,
        payload: [u8; Ksuid::PAYLOAD_LEN],
    }

    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Parts {
            timestamp: id.timestamp(),
            payload: id.payload(),
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = Parts::deserialize(d)?;
        Ok(Ksuid::from_parts(parts.timestamp, parts.payload))
    }
}
