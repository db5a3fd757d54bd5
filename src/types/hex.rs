//! A collection of functions suitable for Hex output
//!
//! Opcodes, MME types, masks and handles are read far more easily as hex. These functions are
//! meant to be used with `#[serde(serialize_with = "...")]` on the individual u8/u16/u32/u64
//! fields.

macro_rules! generate_serialize_hex_fns {
    (($fn:ident, $format:literal, $trait:path)) => {
        pub fn $fn<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
            T: $trait,
        {
            serializer.serialize_str(format!($format, value).as_str())
        }
    };

    ($($tt:tt,)*) => {
        $(
            generate_serialize_hex_fns!($tt);
        )+
    };
}

// Generate functions that can be used to Serialize a value to Hex
generate_serialize_hex_fns! {
    (serialize_lower_hex_u8, "0x{:02x}", core::fmt::LowerHex),
    (serialize_lower_hex_u16, "0x{:04x}", core::fmt::LowerHex),
    (serialize_lower_hex_u24, "0x{:06x}", core::fmt::LowerHex),
    (serialize_lower_hex_u32, "0x{:08x}", core::fmt::LowerHex),
    (serialize_lower_hex_u64, "0x{:016x}", core::fmt::LowerHex),
}

/// Serializes a list of 16 bit values (UUIDs, handles) as hex strings.
pub fn serialize_lower_hex_u16_list<S>(values: &[u16], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(values.iter().map(|v| format!("0x{:04x}", v)))
}

/// Serializes a list of 32 bit values as hex strings.
pub fn serialize_lower_hex_u32_list<S>(values: &[u32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(values.iter().map(|v| format!("0x{:08x}", v)))
}
