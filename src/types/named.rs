//! Coded values with a human readable name
//!
//! Most single octet parameters (reasons, address types, roles, modes) are codes from a table in
//! some specification. `Named` keeps the raw value together with the name it was looked up as,
//! and shows both: `Remote User Terminated Connection (0x13)`.

use core::fmt;
use core::mem::size_of;

use serde::{Serialize, Serializer};

/// A table of `(value, name)` pairs.
pub type ValueStrings<T> = &'static [(T, &'static str)];

/// Name used when a value is not present in its table.
pub const UNKNOWN: &str = "Unknown";

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Named<T> {
    value: T,
    name: &'static str,
}

impl<T: Copy + PartialEq> Named<T> {
    pub fn new(value: T, name: &'static str) -> Self {
        Self { value, name }
    }

    /// Looks `value` up in `table`, falling back to [`UNKNOWN`].
    pub fn lookup(value: T, table: ValueStrings<T>) -> Self {
        let name = table
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(UNKNOWN, |(_, name)| *name);
        Self { value, name }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Default + Copy + PartialEq> Default for Named<T> {
    fn default() -> Self {
        Self::new(T::default(), UNKNOWN)
    }
}

impl<T: fmt::LowerHex> fmt::Display for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (0x{:0width$x})",
            self.name,
            self.value,
            width = size_of::<T>() * 2
        )
    }
}

impl<T: fmt::LowerHex> fmt::Debug for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: fmt::LowerHex> Serialize for Named<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format!("{}", self).as_str())
    }
}

/// Names of the bits set in `value`, in bit order. Bits not in `table` are skipped.
pub fn bit_names(value: u64, table: ValueStrings<u8>) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(bit, _)| *bit < 64 && value & (1_u64 << bit) != 0)
        .map(|(_, name)| *name)
        .collect()
}

/// A bitmask together with the names of the bits set in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bits<T> {
    value: T,
    set: Vec<&'static str>,
}

impl<T: Copy + Into<u64>> Bits<T> {
    pub fn new(value: T, table: ValueStrings<u8>) -> Self {
        Self {
            value,
            set: bit_names(value.into(), table),
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn set(&self) -> &[&'static str] {
        &self.set
    }
}

impl<T: fmt::LowerHex> Serialize for Bits<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Bits", 2)?;
        state.serialize_field(
            "value",
            &format!("0x{:0width$x}", self.value, width = size_of::<T>() * 2),
        )?;
        state.serialize_field("set", &self.set)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ROLES: ValueStrings<u8> = &[(0x00, "Central"), (0x01, "Peripheral")];

    #[test]
    fn lookup_known_and_unknown() {
        let known = Named::lookup(0x01_u8, ROLES);
        assert_eq!(known.name(), "Peripheral");
        assert_eq!(known.to_string(), "Peripheral (0x01)");

        let unknown = Named::lookup(0x7f_u8, ROLES);
        assert_eq!(unknown.name(), UNKNOWN);
        assert_eq!(unknown.value(), 0x7f);
    }

    #[test]
    fn width_follows_type() {
        let n = Named::new(0x0013_u16, "Thirteen");
        assert_eq!(n.to_string(), "Thirteen (0x0013)");
    }

    #[test]
    fn bits_in_order() {
        static BITS: ValueStrings<u8> = &[(0, "zero"), (3, "three"), (63, "top")];
        assert_eq!(
            bit_names(0x8000_0000_0000_0009, BITS),
            vec!["zero", "three", "top"]
        );
    }

    #[test]
    fn bits_serialize_with_type_width() {
        static BITS: ValueStrings<u8> = &[(0, "Role Switch"), (2, "Sniff Mode")];
        let bits = Bits::new(0x0005_u16, BITS);
        assert_eq!(bits.set(), &["Role Switch", "Sniff Mode"]);

        let json = serde_json::to_value(&bits).unwrap();
        assert_eq!(json["value"], "0x0005");
        assert_eq!(json["set"][1], "Sniff Mode");
    }
}
