//! HomePlug AV management message (MME) header
//!
//! ```text
//! | MMV (1) | MMTYPE (2, LE) | FMI (2, MMV >= 1.1 only) | OUI (3, vendor MMTYPEs only) | body |
//! ```
//!
//! The two low bits of MMTYPE are the subtype (REQ/CNF/IND/RSP), bits 13-15 the category.
//! Vendor specific MMTYPEs (0xA000-0xBFFF) are followed by the vendor's OUI, which selects the
//! vendor MME dissector registered with [`register_vendor`].

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::cursor::Cursor;
use crate::errors::Error;
use crate::layers::ethernet;
use crate::types::{Named, ValueStrings, ETHERTYPE_HOMEPLUG_AV};
use crate::Layer;

pub mod vertexcom;

/// Creator function for a vendor MME dissector. Gets the full MMTYPE of the message.
pub type MmeCreatorFn = fn(mmtype: u16) -> Box<dyn Layer + Send>;

/// An IEEE Organizationally Unique Identifier as carried in vendor MMEs.
pub type Oui = [u8; 3];

lazy_static! {
    static ref VENDORS_MAP: RwLock<HashMap<Oui, MmeCreatorFn>> = RwLock::new(HashMap::new());
}

pub const MMV_1_0: u8 = 0x00;
pub const MMV_1_1: u8 = 0x01;
pub const MMV_2_0: u8 = 0x02;

pub const MMTYPE_VENDOR_FIRST: u16 = 0xa000;
pub const MMTYPE_VENDOR_LAST: u16 = 0xbfff;

pub const MMTYPE_REQ: u16 = 0x0000;
pub const MMTYPE_CNF: u16 = 0x0001;
pub const MMTYPE_IND: u16 = 0x0002;
pub const MMTYPE_RSP: u16 = 0x0003;

static MMV_NAMES: ValueStrings<u8> = &[
    (MMV_1_0, "HomePlug AV 1.0"),
    (MMV_1_1, "HomePlug AV 1.1"),
    (MMV_2_0, "HomePlug AV 2.0"),
];

static SUBTYPE_NAMES: ValueStrings<u16> = &[
    (MMTYPE_REQ, "Request"),
    (MMTYPE_CNF, "Confirm"),
    (MMTYPE_IND, "Indication"),
    (MMTYPE_RSP, "Response"),
];

static CATEGORY_NAMES: ValueStrings<u16> = &[
    (0, "STA - Central Coordinator"),
    (1, "Proxy Coordinator"),
    (2, "Central Coordinator - Central Coordinator"),
    (3, "STA - STA"),
    (4, "Manufacturer Specific"),
    (5, "Vendor Specific"),
];

// Register ourselves with Ethernet
pub(crate) fn register_defaults() -> Result<(), Error> {
    lazy_static::initialize(&VENDORS_MAP);

    ethernet::register_ethertype(ETHERTYPE_HOMEPLUG_AV, HomePlugAV::creator)
}

/// Register a vendor MME dissector.
///
/// Vendor specific MMEs start their body with the vendor's OUI. A dissector registered for an
/// OUI is handed every unfragmented vendor specific MME carrying that OUI.
pub fn register_vendor(oui: Oui, creator: MmeCreatorFn) -> Result<(), Error> {
    lazy_static::initialize(&VENDORS_MAP);

    let mut map = VENDORS_MAP
        .write()
        .map_err(|_| Error::RegisterError("homeplug vendor map lock poisoned".to_string()))?;
    if map.contains_key(&oui) {
        return Err(Error::RegisterError(format!("OUI: {}", hex::encode(oui))));
    }
    map.insert(oui, creator);

    Ok(())
}

/// Fragment management information, present from HomePlug AV 1.1 on.
#[derive(Debug, Default, Clone, Copy, Serialize, PartialEq)]
pub struct FragmentInfo {
    /// Number of fragments, minus one.
    nf_mi: u8,
    /// Fragment number of this message.
    fn_mi: u8,
    /// Fragment message sequence number.
    fmsn: u8,
}

impl FragmentInfo {
    fn is_fragmented(&self) -> bool {
        self.nf_mi != 0 || self.fn_mi != 0
    }
}

#[derive(Debug, Default, Serialize)]
pub struct HomePlugAV {
    mmv: Named<u8>,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    mmtype: u16,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    mm_base: u16,
    subtype: Named<u16>,
    category: Named<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<FragmentInfo>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_oui"
    )]
    oui: Option<Oui>,
}

fn serialize_oui<S>(oui: &Option<Oui>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match oui {
        Some(o) => serializer.serialize_str(&format!("{:02x}:{:02x}:{:02x}", o[0], o[1], o[2])),
        None => serializer.serialize_none(),
    }
}

impl HomePlugAV {
    pub fn creator() -> Box<dyn Layer + Send> {
        Box::<HomePlugAV>::default()
    }

    /// True for MMTYPEs in the vendor specific range.
    pub fn is_vendor_mmtype(mmtype: u16) -> bool {
        (MMTYPE_VENDOR_FIRST..=MMTYPE_VENDOR_LAST).contains(&mmtype)
    }
}

impl Layer for HomePlugAV {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        let mut cursor = Cursor::new(bytes);

        self.mmv = Named::lookup(cursor.read_u8()?, MMV_NAMES);
        self.mmtype = cursor.read_u16()?;
        self.mm_base = self.mmtype & !0x0003;
        self.subtype = Named::lookup(self.mmtype & 0x0003, SUBTYPE_NAMES);
        self.category = Named::lookup(self.mmtype >> 13, CATEGORY_NAMES);

        if self.mmv.value() != MMV_1_0 {
            let mi = cursor.read_u8()?;
            self.fragment = Some(FragmentInfo {
                nf_mi: mi >> 4,
                fn_mi: mi & 0x0f,
                fmsn: cursor.read_u8()?,
            });
        }

        if !Self::is_vendor_mmtype(self.mmtype) {
            return Ok((None, cursor.offset()));
        }

        let oui: Oui = cursor.read_array()?;
        self.oui = Some(oui);

        if self.fragment.map_or(false, |f| f.is_fragmented()) {
            #[cfg(feature = "logging")]
            log::debug!(
                "fragmented vendor MME 0x{:04x} left undissected",
                self.mmtype
            );

            return Ok((None, cursor.offset()));
        }

        let map = VENDORS_MAP
            .read()
            .map_err(|_| Error::ParseError("homeplug vendor map lock poisoned".to_string()))?;
        let next = map.get(&oui).map(|creator| creator(self.mmtype));

        Ok((next, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "HomePlug AV"
    }

    fn short_name(&self) -> &'static str {
        "homeplug_av"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(hex_str: &str) -> (HomePlugAV, Option<Box<dyn Layer + Send>>, usize) {
        let _ = crate::register_defaults();

        let bytes = hex::decode(hex_str).unwrap();
        let mut hpav = HomePlugAV::default();
        let (next, consumed) = hpav.decode_bytes(&bytes).unwrap();
        (hpav, next, consumed)
    }

    #[test]
    fn standard_mme_without_vendor() {
        // MMV 1.1, CM_ENCRYPTED_PAYLOAD.IND (0x6006), unfragmented
        let (hpav, next, consumed) = decode("0106600000aabbcc");
        assert!(next.is_none());
        assert_eq!(consumed, 5);
        assert_eq!(hpav.mm_base, 0x6004);
        assert_eq!(hpav.subtype.name(), "Indication");
        assert_eq!(hpav.category.name(), "STA - STA");
        assert_eq!(
            hpav.fragment,
            Some(FragmentInfo {
                nf_mi: 0,
                fn_mi: 0,
                fmsn: 0
            })
        );
        assert!(hpav.oui.is_none());
    }

    #[test]
    fn av_1_0_has_no_fragment_info() {
        let (hpav, _, consumed) = decode("000c00");
        assert_eq!(consumed, 3);
        assert!(hpav.fragment.is_none());
    }

    #[test]
    fn vendor_mme_dispatches_by_oui() {
        let (hpav, next, consumed) = decode(&format!(
            "0101a00000{}",
            hex::encode(vertexcom::VERTEXCOM_OUI)
        ));
        assert_eq!(consumed, 8);
        assert_eq!(hpav.category.name(), "Vendor Specific");
        assert_eq!(hpav.subtype.name(), "Confirm");
        let next = next.expect("vertexcom dissector");
        assert_eq!(next.short_name(), "homeplug_av_vertexcom");
    }

    #[test]
    fn fragmented_vendor_mme_not_dispatched() {
        let (hpav, next, _) = decode(&format!(
            "0100a01105{}",
            hex::encode(vertexcom::VERTEXCOM_OUI)
        ));
        assert!(next.is_none());
        let fragment = hpav.fragment.unwrap();
        assert_eq!((fragment.nf_mi, fragment.fn_mi, fragment.fmsn), (1, 1, 5));
    }

    #[test]
    fn unknown_oui_stops() {
        let (hpav, next, _) = decode("0100a00000010203");
        assert!(next.is_none());
        assert_eq!(hpav.oui, Some([0x01, 0x02, 0x03]));
    }

    #[test]
    fn duplicate_vendor_fails() {
        let _ = crate::register_defaults();

        let res = register_vendor(vertexcom::VERTEXCOM_OUI, vertexcom::VertexComMme::creator);
        assert!(matches!(res, Err(Error::RegisterError(_))));
    }
}
