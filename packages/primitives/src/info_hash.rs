/// `BitTorrent` Info Hash v1 (20 bytes).
///
/// This is also the index key type: modern 32-byte hashes are addressed
/// through their 20-byte truncation, so every swarm key lives in this
/// key space.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct InfoHash(pub [u8; 20]);

pub const INFO_HASH_BYTES_LEN: usize = 20;

/// `BitTorrent` Info Hash v2 (32 bytes), the SHA-256 variant introduced by
/// [BEP 52](https://www.bittorrent.org/beps/bep_0052.html).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct InfoHashV2(pub [u8; 32]);

pub const INFO_HASH_V2_BYTES_LEN: usize = 32;

impl InfoHash {
    /// Create a new `InfoHash` from a byte slice.
    ///
    /// # Panics
    ///
    /// Will panic if the byte slice does not contain the exact amount of
    /// bytes needed for the `InfoHash`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), INFO_HASH_BYTES_LEN);
        let mut ret = Self([0u8; INFO_HASH_BYTES_LEN]);
        ret.0.clone_from_slice(bytes);
        ret
    }

    /// Returns the `InfoHash` as a hex string.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        self.to_string()
    }
}

impl InfoHashV2 {
    /// Create a new `InfoHashV2` from a byte slice.
    ///
    /// # Panics
    ///
    /// Will panic if the byte slice does not contain the exact amount of
    /// bytes needed for the `InfoHashV2`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), INFO_HASH_V2_BYTES_LEN);
        let mut ret = Self([0u8; INFO_HASH_V2_BYTES_LEN]);
        ret.0.clone_from_slice(bytes);
        ret
    }

    /// The 20-byte truncation of this hash.
    ///
    /// [BEP 52](https://www.bittorrent.org/beps/bep_0052.html) addresses v2
    /// torrents on the wire by the first 20 bytes of their hash, which keeps
    /// the legacy key space as the single addressing scheme.
    #[must_use]
    pub fn truncated(&self) -> InfoHash {
        InfoHash::from_bytes(&self.0[..INFO_HASH_BYTES_LEN])
    }
}

/// An info-hash as presented by a client, in either variant.
///
/// Requests carry one of the two; the index is always addressed by the
/// 20-byte key derived with [`ClientInfoHash::index_key`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ClientInfoHash {
    V1(InfoHash),
    V2(InfoHashV2),
}

impl ClientInfoHash {
    /// The 20-byte index key addressing this hash.
    #[must_use]
    pub fn index_key(&self) -> InfoHash {
        match self {
            ClientInfoHash::V1(info_hash) => *info_hash,
            ClientInfoHash::V2(info_hash) => info_hash.truncated(),
        }
    }
}

impl Ord for InfoHash {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::cmp::PartialOrd<InfoHash> for InfoHash {
    fn partial_cmp(&self, other: &InfoHash) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; 40];
        binascii::bin2hex(&self.0, &mut chars).expect("failed to hexlify");
        write!(f, "{}", std::str::from_utf8(&chars).unwrap())
    }
}

impl std::fmt::Display for InfoHashV2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; 64];
        binascii::bin2hex(&self.0, &mut chars).expect("failed to hexlify");
        write!(f, "{}", std::str::from_utf8(&chars).unwrap())
    }
}

impl std::str::FromStr for InfoHash {
    type Err = binascii::ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = Self([0u8; 20]);
        if s.len() != 40 {
            return Err(binascii::ConvertError::InvalidInputLength);
        }
        binascii::hex2bin(s.as_bytes(), &mut i.0)?;
        Ok(i)
    }
}

impl std::str::FromStr for InfoHashV2 {
    type Err = binascii::ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = Self([0u8; 32]);
        if s.len() != 64 {
            return Err(binascii::ConvertError::InvalidInputLength);
        }
        binascii::hex2bin(s.as_bytes(), &mut i.0)?;
        Ok(i)
    }
}

impl std::convert::From<[u8; 20]> for InfoHash {
    fn from(val: [u8; 20]) -> Self {
        InfoHash(val)
    }
}

impl std::convert::From<[u8; 32]> for InfoHashV2 {
    fn from(val: [u8; 32]) -> Self {
        InfoHashV2(val)
    }
}

impl serde::ser::Serialize for InfoHash {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buffer = [0u8; 40];
        let bytes_out = binascii::bin2hex(&self.0, &mut buffer).ok().unwrap();
        let str_out = std::str::from_utf8(bytes_out).unwrap();
        serializer.serialize_str(str_out)
    }
}

impl<'de> serde::de::Deserialize<'de> for InfoHash {
    fn deserialize<D: serde::de::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        des.deserialize_str(InfoHashVisitor)
    }
}

struct InfoHashVisitor;

impl<'v> serde::de::Visitor<'v> for InfoHashVisitor {
    type Value = InfoHash;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "a 40 character long hash")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.len() != 40 {
            return Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(v),
                &"a 40 character long string",
            ));
        }

        let mut res = InfoHash([0u8; 20]);

        if binascii::hex2bin(v.as_bytes(), &mut res.0).is_err() {
            return Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(v),
                &"a hexadecimal string",
            ));
        };
        Ok(res)
    }
}
