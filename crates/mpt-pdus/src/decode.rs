//! Radio unit to TSC decoding.

use crate::codeword::Codeword;
use crate::codewords::ack::Ack;
use crate::codewords::maint::Maint;
use crate::codewords::request::*;
use crate::codewords::samis::Samis;
use crate::fields::*;
use crate::parse_error::CodewordParseErr;

const FUNC_MAINT: u8 = 1;
const DESC_SAMIS: u8 = 0;

/// Classifies a 48-bit codeword received from a radio unit.
///
/// Returns None for anything a radio unit does not send: GTC, CCSC/DCSC,
/// Aloha, the request function 1 and the downlink miscellaneous messages.
/// Bits above 48 are ignored.
pub fn decode_inbound(cw: u64) -> Option<Codeword> {
    let cw = cw & mpt_core::CODEWORD_MASK;
    if cw & ADDRESS_FLAG == 0 || cw & NOT_GTC_FLAG == 0 {
        return None;
    }

    let result = match get_cat(cw) {
        CAT_GENERIC => decode_cat000(cw),
        CAT_SINGLE_ADDRESS if get(cw, 3, FUNC_OFFSET) as u8 == DESC_SAMIS => Some(Samis::from_cw(cw).map(Codeword::Samis)),
        _ => None,
    };

    match result? {
        Ok(codeword) => Some(codeword),
        Err(e) => {
            // Header checked above, so this cannot happen short of a layout bug
            tracing::warn!("decode_inbound: 0x{:012x}: {}", cw, e);
            None
        }
    }
}

fn decode_cat000(cw: u64) -> Option<Result<Codeword, CodewordParseErr>> {
    let func = get_func(cw);
    let res = match get_type(cw) {
        TYPE_ACK => Ack::from_cw(cw).map(Codeword::Ack),
        TYPE_AHOY_REQUEST => match func {
            FUNC_RQS => Rqs::from_cw(cw).map(Codeword::Rqs),
            FUNC_RQX => Rqx::from_cw(cw).map(Codeword::Rqx),
            FUNC_RQT => Rqt::from_cw(cw).map(Codeword::Rqt),
            FUNC_RQE => Rqe::from_cw(cw).map(Codeword::Rqe),
            FUNC_RQR => Rqr::from_cw(cw).map(Codeword::Rqr),
            FUNC_RQQ => Rqq::from_cw(cw).map(Codeword::Rqq),
            FUNC_RQC => Rqc::from_cw(cw).map(Codeword::Rqc),
            _ => return None,
        },
        TYPE_MISC if func == FUNC_MAINT => Maint::from_cw(cw).map(Codeword::Maint),
        _ => return None,
    };
    Some(res)
}
