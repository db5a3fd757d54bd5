//! Command parameters
//!
//! Every command group has its own module with the parameter structures of its commands. The
//! layouts shared by many commands (a lone connection handle, a BD_ADDR, a handle and a reason)
//! live here.

use core::fmt::Debug;

use erased_serde::serialize_trait_object;
use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::bluetooth::common::{read_handle, read_named, ERROR_CODES, LE_ADDRESS_TYPES};
use crate::types::hex::serialize_lower_hex_u16;
use crate::types::{BdAddr, Named};

use super::opcodes::{self, *};
use super::{baseband, informational, le, link_control, link_policy};

/// Decoded parameters of one command.
///
/// Implemented for every `Debug + Serialize` type, so that each command keeps its own parameter
/// structure and the command layer still serializes them.
pub trait CommandParameters: Debug + Send + erased_serde::Serialize {}

impl<T: Debug + Send + Serialize> CommandParameters for T {}

serialize_trait_object!(CommandParameters);

/// Parameters of a command whose layout is not known.
#[derive(Debug, Serialize)]
pub struct RawParameters(#[serde(serialize_with = "hex::serde::serialize")] pub Vec<u8>);

/// Reads `T` and boxes it as [`CommandParameters`].
pub(crate) fn read<T>(c: &mut Cursor<'_>) -> Result<Box<dyn CommandParameters>, Error>
where
    T: Decode + CommandParameters + 'static,
{
    Ok(Box::new(c.read::<T>()?))
}

/// Keeps whatever is left of the parameters as [`RawParameters`], for commands and sub-commands
/// whose layout is not known.
pub(crate) fn read_raw(c: &mut Cursor<'_>) -> Option<Box<dyn CommandParameters>> {
    if c.is_empty() {
        None
    } else {
        Some(Box::new(RawParameters(c.rest().to_vec())))
    }
}

hci_parameters! {
    ConnectionHandle(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
    }

    HandleAndReason(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        connection_handle: u16 = read_handle(c)?,
        reason: Named<u8> = read_named(c, ERROR_CODES)?,
    }

    Address(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
    }

    AddressAndReason(c) {
        bd_addr: BdAddr = c.read_bd_addr()?,
        reason: Named<u8> = read_named(c, ERROR_CODES)?,
    }

    LeAddress(c) {
        address_type: Named<u8> = read_named(c, LE_ADDRESS_TYPES)?,
        address: BdAddr = c.read_bd_addr()?,
    }

    AdvertisingHandle(c) {
        advertising_handle: u8 = c.read_u8()?,
    }

    SyncHandle(c) {
        #[serde(serialize_with = "serialize_lower_hex_u16")]
        sync_handle: u16 = c.read_u16()?,
    }
}

/// Decodes the parameters of the core command `opcode`.
///
/// Returns `None` when the command has no parameters, or raw parameters when the opcode is not
/// known.
pub(crate) fn decode(
    opcode: u16,
    c: &mut Cursor<'_>,
) -> Result<Option<Box<dyn CommandParameters>>, Error> {
    let decoded = match opcodes::ogf(opcode) {
        OGF_LINK_CONTROL => link_control::decode(opcode, c)?,
        OGF_LINK_POLICY => link_policy::decode(opcode, c)?,
        OGF_CONTROLLER_BASEBAND => baseband::decode(opcode, c)?,
        OGF_INFORMATIONAL | OGF_STATUS | OGF_TESTING => informational::decode(opcode, c)?,
        OGF_LE_CONTROLLER => le::decode(opcode, c)?,
        _ => None,
    };

    // Stray bytes after a known command are left to the caller as unparsed.
    if decoded.is_some() || c.is_empty() || opcodes::is_known(opcode) {
        return Ok(decoded);
    }

    #[cfg(feature = "logging")]
    log::debug!(
        "opcode 0x{:04x} ({}): parameters kept raw",
        opcode,
        opcodes::command_name(opcode)
    );

    Ok(read_raw(c))
}
