//! All types that we are supporting

use crate::Layer;

mod macaddr;
pub use macaddr::*;

mod bdaddr;
pub use bdaddr::*;

mod ethertype;
pub use ethertype::*;

mod named;
pub use named::*;

pub mod hex;

/// Creator function type
pub type LayerCreatorFn = fn() -> Box<dyn Layer + Send>;

/// Packet Encapsulation Type
///
/// This value is same as the link types supported by [libpcap][libpcap]
///
/// [libpcap]: https://www.tcpdump.org/linktypes.html
pub type EncapType = u8;

pub static ENCAP_TYPE_ETH: EncapType = 1_u8;

/// Bluetooth HCI UART transport, packet indicator byte first.
pub static ENCAP_TYPE_BLUETOOTH_HCI_H4: EncapType = 187_u8;

/// Same as [`ENCAP_TYPE_BLUETOOTH_HCI_H4`], preceded by a 4 octet direction pseudo-header.
pub static ENCAP_TYPE_BLUETOOTH_HCI_H4_WITH_PHDR: EncapType = 201_u8;
