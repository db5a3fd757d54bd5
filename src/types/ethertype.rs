//! EtherType and the EtherTypes we dissect

pub type EtherType = u16;

/// HomePlug AV (IEEE 1901) management messages.
pub const ETHERTYPE_HOMEPLUG_AV: EtherType = 0x88e1_u16;
