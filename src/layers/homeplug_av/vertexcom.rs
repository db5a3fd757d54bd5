//! VertexCom vendor specific MMEs
//!
//! VertexCom HomePlug AV chips are managed with vendor MMEs in the 0xA000 range. The MME body
//! starts right after the OUI, which the [`HomePlugAV`][`super::HomePlugAV`] layer has already
//! consumed. All multi-octet fields are little-endian.

use serde::Serialize;

use crate::cursor::{Cursor, Decode};
use crate::errors::Error;
use crate::layers::homeplug_av::{self, Oui, MMTYPE_CNF, MMTYPE_IND, MMTYPE_REQ};
use crate::types::{MACAddress, Named, ValueStrings};
use crate::Layer;

pub const VERTEXCOM_OUI: Oui = [0x00, 0x13, 0xd7];

pub const VC_GET_VERSION: u16 = 0xa000;
pub const VC_RESET_DEVICE: u16 = 0xa004;
pub const VC_GET_NETWORK_INFO: u16 = 0xa008;
pub const VC_SET_KEY: u16 = 0xa00c;
pub const VC_LINK_STATS: u16 = 0xa010;
pub const VC_TONE_MAP: u16 = 0xa014;
pub const VC_GET_PARAMETERS: u16 = 0xa018;
pub const VC_SET_PARAMETERS: u16 = 0xa01c;
pub const VC_WRITE_MODULE: u16 = 0xa020;
pub const VC_READ_MEMORY: u16 = 0xa024;
pub const VC_EVENT: u16 = 0xa028;

static MME_NAMES: ValueStrings<u16> = &[
    (VC_GET_VERSION, "Get Version"),
    (VC_RESET_DEVICE, "Reset Device"),
    (VC_GET_NETWORK_INFO, "Get Network Info"),
    (VC_SET_KEY, "Set Key"),
    (VC_LINK_STATS, "Link Statistics"),
    (VC_TONE_MAP, "Tone Map"),
    (VC_GET_PARAMETERS, "Get Parameters"),
    (VC_SET_PARAMETERS, "Set Parameters"),
    (VC_WRITE_MODULE, "Write Module"),
    (VC_READ_MEMORY, "Read Memory"),
    (VC_EVENT, "Event"),
];

static STATUS_NAMES: ValueStrings<u8> = &[
    (0x00, "Success"),
    (0x01, "Failure"),
    (0x02, "Invalid Parameter"),
    (0x03, "Not Supported"),
    (0x04, "Busy"),
    (0x05, "Invalid Module"),
    (0x06, "Invalid Offset"),
];

static RESET_MODES: ValueStrings<u8> = &[
    (0x00, "Warm Reset"),
    (0x01, "Cold Reset"),
    (0x02, "Restore Factory Defaults"),
];

static ROLES: ValueStrings<u8> = &[
    (0x00, "Station"),
    (0x01, "Proxy Coordinator"),
    (0x02, "Central Coordinator"),
];

static DIRECTIONS: ValueStrings<u8> = &[(0x00, "Transmit"), (0x01, "Receive")];

static SECURITY_LEVELS: ValueStrings<u8> = &[(0x00, "Simple Connect"), (0x01, "Secure")];

static MODULE_IDS: ValueStrings<u8> = &[
    (0x00, "Firmware Image"),
    (0x01, "Parameter Block"),
    (0x02, "Boot Loader"),
];

static EVENT_TYPES: ValueStrings<u8> = &[
    (0x00, "Link Up"),
    (0x01, "Link Down"),
    (0x02, "Network Joined"),
    (0x03, "Network Left"),
    (0x04, "Firmware Error"),
];

static MODULATIONS: ValueStrings<u8> = &[
    (0x0, "No Modulation"),
    (0x1, "BPSK"),
    (0x2, "QPSK"),
    (0x3, "8-QAM"),
    (0x4, "16-QAM"),
    (0x5, "64-QAM"),
    (0x6, "256-QAM"),
    (0x7, "1024-QAM"),
    (0x8, "4096-QAM"),
];

// Register ourselves with HomePlug AV
pub(crate) fn register_defaults() -> Result<(), Error> {
    homeplug_av::register_vendor(VERTEXCOM_OUI, VertexComMme::creator)
}

fn read_status(cursor: &mut Cursor<'_>) -> Result<Named<u8>, Error> {
    Ok(Named::lookup(cursor.read_u8()?, STATUS_NAMES))
}

fn serialize_nid<S>(nid: &[u8; 7], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(nid))
}

/// A confirm that carries nothing but the status.
#[derive(Debug, Default, Serialize)]
pub struct StatusCnf {
    status: Named<u8>,
}

impl Decode for StatusCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            status: read_status(cursor)?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct GetVersionCnf {
    status: Named<u8>,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    chip_id: u32,
    hardware_revision: u8,
    firmware_version: String,
}

impl Decode for GetVersionCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let status = read_status(cursor)?;
        let chip_id = cursor.read_u32()?;
        let hardware_revision = cursor.read_u8()?;
        let len = cursor.read_u8()? as usize;
        let version = cursor.read_bytes(len)?;
        // firmware fills the field with NULs after the string
        let end = version.iter().position(|b| *b == 0).unwrap_or(version.len());
        Ok(Self {
            status,
            chip_id,
            hardware_revision,
            firmware_version: String::from_utf8_lossy(&version[..end]).into_owned(),
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ResetReq {
    mode: Named<u8>,
}

impl Decode for ResetReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            mode: Named::lookup(cursor.read_u8()?, RESET_MODES),
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct StationInfo {
    mac: MACAddress,
    tei: u8,
    /// Mbit/s
    avg_tx_phy_rate: u16,
    /// Mbit/s
    avg_rx_phy_rate: u16,
}

impl Decode for StationInfo {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            mac: cursor.read_mac()?,
            tei: cursor.read_u8()?,
            avg_tx_phy_rate: cursor.read_u16()?,
            avg_rx_phy_rate: cursor.read_u16()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct NetworkInfoCnf {
    status: Named<u8>,
    #[serde(serialize_with = "serialize_nid")]
    nid: [u8; 7],
    snid: u8,
    tei: u8,
    role: Named<u8>,
    cco_mac: MACAddress,
    num_stations: u8,
    stations: Vec<StationInfo>,
}

impl Decode for NetworkInfoCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let status = read_status(cursor)?;
        let nid = cursor.read_array()?;
        let snid = cursor.read_u8()? & 0x0f;
        let tei = cursor.read_u8()?;
        let role = Named::lookup(cursor.read_u8()?, ROLES);
        let cco_mac = cursor.read_mac()?;
        let num_stations = cursor.read_u8()?;
        let stations = cursor.read_list(num_stations as usize)?;
        Ok(Self {
            status,
            nid,
            snid,
            tei,
            role,
            cco_mac,
            num_stations,
            stations,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SetKeyReq {
    #[serde(serialize_with = "hex::serde::serialize")]
    nmk: [u8; 16],
    #[serde(serialize_with = "serialize_nid")]
    nid: [u8; 7],
    security_level: Named<u8>,
}

impl Decode for SetKeyReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            nmk: cursor.read_array()?,
            nid: cursor.read_array()?,
            security_level: Named::lookup(cursor.read_u8()?, SECURITY_LEVELS),
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct LinkStatsReq {
    direction: Named<u8>,
    link_id: u8,
    peer_mac: MACAddress,
}

impl Decode for LinkStatsReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            direction: Named::lookup(cursor.read_u8()?, DIRECTIONS),
            link_id: cursor.read_u8()?,
            peer_mac: cursor.read_mac()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct LinkStatsCnf {
    status: Named<u8>,
    direction: Named<u8>,
    link_id: u8,
    peer_mac: MACAddress,
    mpdu_count: u32,
    mpdu_errors: u32,
    pb_count: u32,
    pb_errors: u32,
}

impl Decode for LinkStatsCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            status: read_status(cursor)?,
            direction: Named::lookup(cursor.read_u8()?, DIRECTIONS),
            link_id: cursor.read_u8()?,
            peer_mac: cursor.read_mac()?,
            mpdu_count: cursor.read_u32()?,
            mpdu_errors: cursor.read_u32()?,
            pb_count: cursor.read_u32()?,
            pb_errors: cursor.read_u32()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ToneMapReq {
    peer_mac: MACAddress,
    tmi: u8,
}

impl Decode for ToneMapReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            peer_mac: cursor.read_mac()?,
            tmi: cursor.read_u8()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ToneMapCnf {
    status: Named<u8>,
    tmi: u8,
    num_carriers: u16,
    /// One entry per carrier.
    modulations: Vec<&'static str>,
}

impl Decode for ToneMapCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let status = read_status(cursor)?;
        let tmi = cursor.read_u8()?;
        let num_carriers = cursor.read_u16()?;

        // Two carriers per octet, the lower numbered carrier in the low nibble.
        let packed = cursor.read_bytes((num_carriers as usize + 1) / 2)?;
        let modulations = (0..num_carriers as usize)
            .map(|carrier| {
                let byte = packed[carrier / 2];
                let nibble = if carrier % 2 == 0 { byte & 0x0f } else { byte >> 4 };
                Named::lookup(nibble, MODULATIONS).name()
            })
            .collect();

        Ok(Self {
            status,
            tmi,
            num_carriers,
            modulations,
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterId(#[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")] u16);

impl Decode for ParameterId {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self(cursor.read_u16()?))
    }
}

#[derive(Debug, Default, Serialize)]
pub struct GetParametersReq {
    count: u8,
    ids: Vec<ParameterId>,
}

impl Decode for GetParametersReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let count = cursor.read_u8()?;
        let ids = cursor.read_list(count as usize)?;
        Ok(Self { count, ids })
    }
}

/// A parameter as `id, length, value`.
#[derive(Debug, Default, Serialize)]
pub struct Parameter {
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    id: u16,
    length: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    value: Vec<u8>,
}

impl Decode for Parameter {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let id = cursor.read_u16()?;
        let length = cursor.read_u16()?;
        let value = cursor.read_bytes(length as usize)?.to_vec();
        Ok(Self { id, length, value })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct GetParametersCnf {
    status: Named<u8>,
    count: u8,
    parameters: Vec<Parameter>,
}

impl Decode for GetParametersCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let status = read_status(cursor)?;
        let count = cursor.read_u8()?;
        let parameters = cursor.read_list(count as usize)?;
        Ok(Self {
            status,
            count,
            parameters,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SetParametersReq {
    count: u8,
    parameters: Vec<Parameter>,
}

impl Decode for SetParametersReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let count = cursor.read_u8()?;
        let parameters = cursor.read_list(count as usize)?;
        Ok(Self { count, parameters })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct WriteModuleReq {
    module_id: Named<u8>,
    total_length: u32,
    offset: u32,
    chunk_length: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for WriteModuleReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let module_id = Named::lookup(cursor.read_u8()?, MODULE_IDS);
        let total_length = cursor.read_u32()?;
        let offset = cursor.read_u32()?;
        let chunk_length = cursor.read_u16()?;
        let data = cursor.read_bytes(chunk_length as usize)?.to_vec();
        Ok(Self {
            module_id,
            total_length,
            offset,
            chunk_length,
            data,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct WriteModuleCnf {
    status: Named<u8>,
    module_id: Named<u8>,
    offset: u32,
}

impl Decode for WriteModuleCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            status: read_status(cursor)?,
            module_id: Named::lookup(cursor.read_u8()?, MODULE_IDS),
            offset: cursor.read_u32()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ReadMemoryReq {
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    address: u32,
    length: u16,
}

impl Decode for ReadMemoryReq {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            address: cursor.read_u32()?,
            length: cursor.read_u16()?,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ReadMemoryCnf {
    status: Named<u8>,
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u32")]
    address: u32,
    length: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for ReadMemoryCnf {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let status = read_status(cursor)?;
        let address = cursor.read_u32()?;
        let length = cursor.read_u16()?;
        let data = cursor.read_bytes(length as usize)?.to_vec();
        Ok(Self {
            status,
            address,
            length,
            data,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct EventInd {
    event_type: Named<u8>,
    timestamp: u32,
    #[serde(serialize_with = "hex::serde::serialize")]
    data: Vec<u8>,
}

impl Decode for EventInd {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let event_type = Named::lookup(cursor.read_u8()?, EVENT_TYPES);
        let timestamp = cursor.read_u32()?;
        let len = cursor.read_u8()? as usize;
        let data = cursor.read_bytes(len)?.to_vec();
        Ok(Self {
            event_type,
            timestamp,
            data,
        })
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(untagged)]
pub enum VertexComBody {
    #[default]
    Empty,
    Status(StatusCnf),
    GetVersionCnf(GetVersionCnf),
    ResetReq(ResetReq),
    NetworkInfoCnf(NetworkInfoCnf),
    SetKeyReq(SetKeyReq),
    LinkStatsReq(LinkStatsReq),
    LinkStatsCnf(LinkStatsCnf),
    ToneMapReq(ToneMapReq),
    ToneMapCnf(ToneMapCnf),
    GetParametersReq(GetParametersReq),
    GetParametersCnf(GetParametersCnf),
    SetParametersReq(SetParametersReq),
    WriteModuleReq(WriteModuleReq),
    WriteModuleCnf(WriteModuleCnf),
    ReadMemoryReq(ReadMemoryReq),
    ReadMemoryCnf(ReadMemoryCnf),
    EventInd(EventInd),
    Raw(#[serde(serialize_with = "hex::serde::serialize")] Vec<u8>),
}

impl VertexComBody {
    fn is_empty(&self) -> bool {
        matches!(self, VertexComBody::Empty)
    }

    fn decode(mmtype: u16, cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let base = mmtype & !0x0003;
        let subtype = mmtype & 0x0003;

        let body = match (base, subtype) {
            (VC_GET_VERSION, MMTYPE_REQ)
            | (VC_GET_NETWORK_INFO, MMTYPE_REQ) => Self::Empty,
            (VC_GET_VERSION, MMTYPE_CNF) => Self::GetVersionCnf(cursor.read()?),
            (VC_RESET_DEVICE, MMTYPE_REQ) => Self::ResetReq(cursor.read()?),
            (VC_GET_NETWORK_INFO, MMTYPE_CNF) => Self::NetworkInfoCnf(cursor.read()?),
            (VC_SET_KEY, MMTYPE_REQ) => Self::SetKeyReq(cursor.read()?),
            (VC_LINK_STATS, MMTYPE_REQ) => Self::LinkStatsReq(cursor.read()?),
            (VC_LINK_STATS, MMTYPE_CNF) => Self::LinkStatsCnf(cursor.read()?),
            (VC_TONE_MAP, MMTYPE_REQ) => Self::ToneMapReq(cursor.read()?),
            (VC_TONE_MAP, MMTYPE_CNF) => Self::ToneMapCnf(cursor.read()?),
            (VC_GET_PARAMETERS, MMTYPE_REQ) => Self::GetParametersReq(cursor.read()?),
            (VC_GET_PARAMETERS, MMTYPE_CNF) => Self::GetParametersCnf(cursor.read()?),
            (VC_SET_PARAMETERS, MMTYPE_REQ) => Self::SetParametersReq(cursor.read()?),
            (VC_WRITE_MODULE, MMTYPE_REQ) => Self::WriteModuleReq(cursor.read()?),
            (VC_WRITE_MODULE, MMTYPE_CNF) => Self::WriteModuleCnf(cursor.read()?),
            (VC_READ_MEMORY, MMTYPE_REQ) => Self::ReadMemoryReq(cursor.read()?),
            (VC_READ_MEMORY, MMTYPE_CNF) => Self::ReadMemoryCnf(cursor.read()?),
            (VC_EVENT, MMTYPE_IND) => Self::EventInd(cursor.read()?),
            (VC_RESET_DEVICE, MMTYPE_CNF)
            | (VC_SET_KEY, MMTYPE_CNF)
            | (VC_SET_PARAMETERS, MMTYPE_CNF) => Self::Status(cursor.read()?),
            _ => {
                #[cfg(feature = "logging")]
                log::debug!("unknown VertexCom MME 0x{:04x}", mmtype);

                Self::Raw(cursor.rest().to_vec())
            }
        };

        Ok(body)
    }
}

/// A VertexCom vendor MME.
#[derive(Debug, Default, Serialize)]
pub struct VertexComMme {
    #[serde(serialize_with = "crate::types::hex::serialize_lower_hex_u16")]
    mmtype: u16,
    mme: &'static str,
    #[serde(skip_serializing_if = "VertexComBody::is_empty")]
    body: VertexComBody,
}

impl VertexComMme {
    pub fn creator(mmtype: u16) -> Box<dyn Layer + Send> {
        Box::new(VertexComMme {
            mmtype,
            ..Default::default()
        })
    }
}

impl Layer for VertexComMme {
    fn decode_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Box<dyn Layer + Send>>, usize), Error> {
        self.mme = Named::lookup(self.mmtype & !0x0003, MME_NAMES).name();

        let mut cursor = Cursor::new(bytes);
        self.body = VertexComBody::decode(self.mmtype, &mut cursor)?;

        Ok((None, cursor.offset()))
    }

    fn name(&self) -> &'static str {
        "HomePlug AV VertexCom"
    }

    fn short_name(&self) -> &'static str {
        "homeplug_av_vertexcom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Packet;
    use crate::types::ENCAP_TYPE_ETH;

    fn decode(mmtype: u16, body_hex: &str) -> (VertexComMme, usize) {
        let body = hex::decode(body_hex).unwrap();
        let mut mme = VertexComMme {
            mmtype,
            ..Default::default()
        };
        let (next, consumed) = mme.decode_bytes(&body).unwrap();
        assert!(next.is_none());
        (mme, consumed)
    }

    #[test]
    fn get_version_cnf() {
        // status ok, chip 0x00007531, rev 2, "1.2.3" NUL padded to 8 octets
        let (mme, consumed) = decode(0xa001, "00317500000208312e322e33000000");
        assert_eq!(mme.mme, "Get Version");
        assert_eq!(consumed, 15);
        match mme.body {
            VertexComBody::GetVersionCnf(ref v) => {
                assert_eq!(v.chip_id, 0x7531);
                assert_eq!(v.hardware_revision, 2);
                assert_eq!(v.firmware_version, "1.2.3");
            }
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn network_info_with_stations() {
        let body = concat!(
            "00",             // status
            "01020304050607", // nid
            "05",             // snid
            "01",             // tei
            "02",             // role: CCo
            "0013d7aabbcc",   // cco mac
            "02",             // stations
            "0013d7000001", "02", "2c01", "f000",
            "0013d7000002", "03", "6400", "c800",
        );
        let (mme, consumed) = decode(VC_GET_NETWORK_INFO | MMTYPE_CNF, body);
        assert_eq!(consumed, hex::decode(body).unwrap().len());
        match mme.body {
            VertexComBody::NetworkInfoCnf(ref info) => {
                assert_eq!(info.role.name(), "Central Coordinator");
                assert_eq!(info.stations.len(), 2);
                assert_eq!(info.stations[0].avg_tx_phy_rate, 300);
                assert_eq!(info.stations[1].tei, 3);
                assert_eq!(info.stations[1].avg_rx_phy_rate, 200);
            }
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn network_info_station_count_too_large() {
        let body = "00010203040506070501020013d7aabbcc03";
        let mut mme = VertexComMme {
            mmtype: VC_GET_NETWORK_INFO | MMTYPE_CNF,
            ..Default::default()
        };
        let res = mme.decode_bytes(&hex::decode(body).unwrap());
        assert!(matches!(res, Err(Error::TooShort { .. })));
    }

    #[test]
    fn tone_map_nibbles() {
        // 5 carriers: BPSK, QPSK, 1024-QAM, none, 4096-QAM
        let (mme, _) = decode(VC_TONE_MAP | MMTYPE_CNF, "00000500210708");
        match mme.body {
            VertexComBody::ToneMapCnf(ref tm) => {
                assert_eq!(
                    tm.modulations,
                    vec!["BPSK", "QPSK", "1024-QAM", "No Modulation", "4096-QAM"]
                );
            }
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn get_parameters_tlv() {
        let body = concat!(
            "00", "02",                   // status, count
            "0100", "0100", "05",         // id 1, len 1
            "0200", "0400", "deadbeef",   // id 2, len 4
        );
        let (mme, _) = decode(VC_GET_PARAMETERS | MMTYPE_CNF, body);
        match mme.body {
            VertexComBody::GetParametersCnf(ref p) => {
                assert_eq!(p.parameters.len(), 2);
                assert_eq!(p.parameters[0].value, vec![0x05]);
                assert_eq!(p.parameters[1].id, 2);
                assert_eq!(p.parameters[1].value, vec![0xde, 0xad, 0xbe, 0xef]);
            }
            ref other => panic!("{:?}", other),
        }
    }

    #[test]
    fn status_only_and_unknown() {
        let (mme, consumed) = decode(VC_SET_KEY | MMTYPE_CNF, "03");
        assert_eq!(consumed, 1);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["status"], "Not Supported (0x03)");

        let (mme, consumed) = decode(0xa0fd, "0102");
        assert_eq!(consumed, 2);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["mme"], "Unknown");
        assert_eq!(json["body"], "0102");
    }

    #[test]
    fn full_frame_reset_request() {
        let _ = crate::register_defaults();

        let frame = concat!(
            "0013d7aabbcc", "0013d7010203", "88e1", // ethernet
            "01", "04a0", "0000", "0013d7",         // MMV 1.1, VC_RESET_DEVICE.REQ, FMI, OUI
            "01",                                   // cold reset
        );
        let bytes = hex::decode(frame).unwrap();
        let p = Packet::from_bytes(&bytes, ENCAP_TYPE_ETH).unwrap();
        assert_eq!(p.layers().len(), 3, "{:?}", p);
        assert!(p.unprocessed().is_empty());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["homeplug_av"]["oui"], "00:13:d7");
        assert_eq!(json["homeplug_av_vertexcom"]["mme"], "Reset Device");
        assert_eq!(
            json["homeplug_av_vertexcom"]["body"]["mode"],
            "Cold Reset (0x01)"
        );
    }

    #[test]
    fn set_key_req() {
        let body = concat!(
            "00112233445566778899aabbccddeeff", // nmk
            "01020304050607",                   // nid
            "01",                               // secure
        );
        let (mme, consumed) = decode(VC_SET_KEY | MMTYPE_REQ, body);
        assert_eq!(mme.mme, "Set Key");
        assert_eq!(consumed, 24);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["nmk"], "00112233445566778899aabbccddeeff");
        assert_eq!(json["body"]["nid"], "01020304050607");
        assert_eq!(json["body"]["security_level"], "Secure (0x01)");
    }

    #[test]
    fn link_stats_req_and_cnf() {
        let (mme, consumed) = decode(VC_LINK_STATS | MMTYPE_REQ, "01030013d7000001");
        assert_eq!(consumed, 8);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["direction"], "Receive (0x01)");
        assert_eq!(json["body"]["link_id"], 3);
        assert_eq!(json["body"]["peer_mac"], "00:13:d7:00:00:01");

        let body = concat!(
            "00", "00", "03", "0013d7000001", // status, transmit, link 3, peer
            "e8030000", "05000000",           // mpdus, mpdu errors
            "10270000", "02000000",           // pbs, pb errors
        );
        let (mme, consumed) = decode(VC_LINK_STATS | MMTYPE_CNF, body);
        assert_eq!(consumed, 25);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["status"], "Success (0x00)");
        assert_eq!(json["body"]["direction"], "Transmit (0x00)");
        assert_eq!(json["body"]["mpdu_count"], 1000);
        assert_eq!(json["body"]["mpdu_errors"], 5);
        assert_eq!(json["body"]["pb_count"], 10000);
        assert_eq!(json["body"]["pb_errors"], 2);
    }

    #[test]
    fn get_parameters_req_ids() {
        let (mme, consumed) = decode(VC_GET_PARAMETERS | MMTYPE_REQ, "0201003412");
        assert_eq!(consumed, 5);
        match mme.body {
            VertexComBody::GetParametersReq(ref p) => {
                assert_eq!(p.ids, vec![ParameterId(0x0001), ParameterId(0x1234)]);
            }
            ref other => panic!("{:?}", other),
        }
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["ids"], serde_json::json!(["0x0001", "0x1234"]));

        let mut mme = VertexComMme {
            mmtype: VC_GET_PARAMETERS | MMTYPE_REQ,
            ..Default::default()
        };
        let res = mme.decode_bytes(&hex::decode("030100").unwrap());
        assert!(matches!(res, Err(Error::TooShort { .. })));
    }

    #[test]
    fn set_parameters_req() {
        let (mme, consumed) = decode(VC_SET_PARAMETERS | MMTYPE_REQ, "0105000200abcd");
        assert_eq!(consumed, 7);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["mme"], "Set Parameters");
        assert_eq!(json["body"]["count"], 1);
        assert_eq!(json["body"]["parameters"][0]["id"], "0x0005");
        assert_eq!(json["body"]["parameters"][0]["length"], 2);
        assert_eq!(json["body"]["parameters"][0]["value"], "abcd");
    }

    #[test]
    fn write_module_req_and_cnf() {
        let body = concat!(
            "01",       // parameter block
            "00010000", // total length 256
            "80000000", // offset 128
            "0400",     // chunk length
            "deadbeef",
        );
        let (mme, consumed) = decode(VC_WRITE_MODULE | MMTYPE_REQ, body);
        assert_eq!(consumed, 15);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["module_id"], "Parameter Block (0x01)");
        assert_eq!(json["body"]["total_length"], 256);
        assert_eq!(json["body"]["offset"], 128);
        assert_eq!(json["body"]["chunk_length"], 4);
        assert_eq!(json["body"]["data"], "deadbeef");

        let (mme, consumed) = decode(VC_WRITE_MODULE | MMTYPE_CNF, "060080000000");
        assert_eq!(consumed, 6);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["status"], "Invalid Offset (0x06)");
        assert_eq!(json["body"]["module_id"], "Firmware Image (0x00)");
        assert_eq!(json["body"]["offset"], 128);
    }

    #[test]
    fn read_memory_req_and_cnf() {
        let (mme, consumed) = decode(VC_READ_MEMORY | MMTYPE_REQ, "001000200800");
        assert_eq!(consumed, 6);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["mme"], "Read Memory");
        assert_eq!(json["body"]["address"], "0x20001000");
        assert_eq!(json["body"]["length"], 8);

        let (mme, consumed) = decode(VC_READ_MEMORY | MMTYPE_CNF, "0000100020040001020304");
        assert_eq!(consumed, 11);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["body"]["status"], "Success (0x00)");
        assert_eq!(json["body"]["address"], "0x20001000");
        assert_eq!(json["body"]["length"], 4);
        assert_eq!(json["body"]["data"], "01020304");
    }

    #[test]
    fn event_ind() {
        let (mme, consumed) = decode(VC_EVENT | MMTYPE_IND, "017856341202aabb");
        assert_eq!(mme.mmtype, 0xa02a);
        assert_eq!(consumed, 8);
        let json = serde_json::to_value(&mme).unwrap();
        assert_eq!(json["mme"], "Event");
        assert_eq!(json["body"]["event_type"], "Link Down (0x01)");
        assert_eq!(json["body"]["timestamp"], 0x1234_5678);
        assert_eq!(json["body"]["data"], "aabb");
    }
}
