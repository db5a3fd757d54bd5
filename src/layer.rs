//! 'Layer' trait
//!
//! [`Layer`] trait is central to [`hcimme`][`crate`]. Every dissector (the H4 framing, the HCI
//! command decoder, each vendor extension, the HomePlug AV header and its vendor MMEs) implements
//! the `Layer` trait. Each Layer implements a `decode_bytes` function that returns the result of
//! parsing the given byte slice.

use core::fmt::Debug;

use erased_serde::serialize_trait_object;

use crate::errors::Error;

/// `Layer` Trait defines a 'Layer' in a Packet
///
/// A layer is one dissector's view of the bytes: a framing header, a command with its
/// parameters, or a vendor specific body that an outer layer handed over.
pub trait Layer: Send + Debug + erased_serde::Serialize {
    /// Main 'decoder' function.
    ///
    /// The return value is a Tuple `(Option<Box<dyn Layer + Send>>, usize)` on success. This
    /// indicates the dissector for the next layer (if the current layer knows one) and the number
    /// of bytes consumed. A return value of `None` indicates we do not know how to decode further,
    /// which is not an error: the remaining bytes are kept as unprocessed data of the packet.
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error>;

    /// Name for the given layer.
    fn name(&self) -> &'static str;

    /// Short name for the given layer. Used as the key when the packet is serialized.
    fn short_name(&self) -> &'static str;
}

serialize_trait_object!(Layer);
