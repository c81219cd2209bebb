use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::packet::PacketKind;
use super::reader::TsipReader;

/// Fix dimension reported in the low three bits of the 0x6D status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    OneDimensionalClock,
    TwoDimensional,
    ThreeDimensional,
    OverdeterminedClock,
    Other(u8),
}

impl FixType {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => FixType::OneDimensionalClock,
            3 => FixType::TwoDimensional,
            4 => FixType::ThreeDimensional,
            5 => FixType::OverdeterminedClock,
            other => FixType::Other(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            FixType::OneDimensionalClock => 1,
            FixType::TwoDimensional => 3,
            FixType::ThreeDimensional => 4,
            FixType::OverdeterminedClock => 5,
            FixType::Other(code) => code,
        }
    }
}

/// All-in-view satellite selection (0x6D).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllInView {
    pub status: FixType,
    pub auto_fix: bool,
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
    pub tdop: f32,
    /// Satellites used in the fix. Empty when the status byte announces more
    /// PRNs than the body carries.
    pub satellites: Vec<i8>,
}

pub fn parse_all_in_view(body: &[u8]) -> Result<AllInView, DecodeError> {
    let reader = TsipReader::new(PacketKind::AllInView, body);
    reader.require_len(layout::AIV_MIN_LEN)?;

    let status = reader.read_u8(layout::AIV_STATUS_OFFSET)?;
    let count = usize::from(status >> layout::AIV_SATELLITE_COUNT_SHIFT);

    let satellites = if reader.payload_len() >= layout::AIV_PRN_OFFSET + count {
        (layout::AIV_PRN_OFFSET..layout::AIV_PRN_OFFSET + count)
            .map(|offset| reader.read_i8(offset))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    Ok(AllInView {
        status: FixType::from_code(status & layout::AIV_FIX_MASK),
        auto_fix: status & layout::AIV_AUTO_FIX_MASK != 0,
        pdop: reader.read_f32_be(layout::AIV_PDOP_RANGE)?,
        hdop: reader.read_f32_be(layout::AIV_HDOP_RANGE)?,
        vdop: reader.read_f32_be(layout::AIV_VDOP_RANGE)?,
        tdop: reader.read_f32_be(layout::AIV_TDOP_RANGE)?,
        satellites,
    })
}
