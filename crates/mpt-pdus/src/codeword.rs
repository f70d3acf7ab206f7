use core::fmt;

use mpt_core::{TRAFFIC_SYNC_WORD, fcs_add};

use crate::codewords::ack::Ack;
use crate::codewords::ahoy::{Ahy, Ahyc, Ahyp, Ahyq, Ahyx};
use crate::codewords::aloha::Aloha;
use crate::codewords::bcast::Bcast;
use crate::codewords::gtc::Gtc;
use crate::codewords::maint::{Clear, Maint, Move};
use crate::codewords::request::{Rqc, Rqe, Rqq, Rqr, Rqs, Rqt, Rqx};
use crate::codewords::samis::Samis;
use crate::codewords::sync::{Ccsc, Dcsc};

/// Encoded value of [`Codeword::Traffic`]. Never a valid codeword, since a
/// codeword with bit 47 clear is a CCSC/DCSC and always has the preamble in
/// its low 16 bits.
pub const TRAFFIC_MARKER: u64 = 1;

/// Any codeword the controller sends or receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codeword {
    Ccsc(Ccsc),
    Dcsc(Dcsc),
    Gtc(Gtc),
    Aloha(Aloha),
    Ack(Ack),
    Ahy(Ahy),
    Ahyx(Ahyx),
    Ahyp(Ahyp),
    Ahyq(Ahyq),
    Ahyc(Ahyc),
    Maint(Maint),
    Clear(Clear),
    Move(Move),
    Bcast(Bcast),
    Rqs(Rqs),
    Rqx(Rqx),
    Rqt(Rqt),
    Rqe(Rqe),
    Rqr(Rqr),
    Rqq(Rqq),
    Rqc(Rqc),
    Samis(Samis),
    /// Slot on a traffic channel that carries SYNT instead of a codeword
    Traffic,
}

impl Codeword {
    /// The 48-bit codeword, or [`TRAFFIC_MARKER`]
    pub fn encode(&self) -> u64 {
        match self {
            Codeword::Ccsc(c) => c.to_cw(),
            Codeword::Dcsc(c) => c.to_cw(),
            Codeword::Gtc(c) => c.to_cw(),
            Codeword::Aloha(c) => c.to_cw(),
            Codeword::Ack(c) => c.to_cw(),
            Codeword::Ahy(c) => c.to_cw(),
            Codeword::Ahyx(c) => c.to_cw(),
            Codeword::Ahyp(c) => c.to_cw(),
            Codeword::Ahyq(c) => c.to_cw(),
            Codeword::Ahyc(c) => c.to_cw(),
            Codeword::Maint(c) => c.to_cw(),
            Codeword::Clear(c) => c.to_cw(),
            Codeword::Move(c) => c.to_cw(),
            Codeword::Bcast(c) => c.to_cw(),
            Codeword::Rqs(c) => c.to_cw(),
            Codeword::Rqx(c) => c.to_cw(),
            Codeword::Rqt(c) => c.to_cw(),
            Codeword::Rqe(c) => c.to_cw(),
            Codeword::Rqr(c) => c.to_cw(),
            Codeword::Rqq(c) => c.to_cw(),
            Codeword::Rqc(c) => c.to_cw(),
            Codeword::Samis(c) => c.to_cw(),
            Codeword::Traffic => TRAFFIC_MARKER,
        }
    }

    /// The 64-bit word that goes on air: codeword plus FCS, or preamble plus
    /// SYNT for a traffic slot
    pub fn to_wire(&self) -> u64 {
        match self {
            Codeword::Traffic => TRAFFIC_SYNC_WORD,
            _ => fcs_add(self.encode()),
        }
    }

    pub fn is_traffic(&self) -> bool {
        matches!(self, Codeword::Traffic)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codeword::Ccsc(c) => c.fmt(f),
            Codeword::Dcsc(c) => c.fmt(f),
            Codeword::Gtc(c) => c.fmt(f),
            Codeword::Aloha(c) => c.fmt(f),
            Codeword::Ack(c) => c.fmt(f),
            Codeword::Ahy(c) => c.fmt(f),
            Codeword::Ahyx(c) => c.fmt(f),
            Codeword::Ahyp(c) => c.fmt(f),
            Codeword::Ahyq(c) => c.fmt(f),
            Codeword::Ahyc(c) => c.fmt(f),
            Codeword::Maint(c) => c.fmt(f),
            Codeword::Clear(c) => c.fmt(f),
            Codeword::Move(c) => c.fmt(f),
            Codeword::Bcast(c) => c.fmt(f),
            Codeword::Rqs(c) => c.fmt(f),
            Codeword::Rqx(c) => c.fmt(f),
            Codeword::Rqt(c) => c.fmt(f),
            Codeword::Rqe(c) => c.fmt(f),
            Codeword::Rqr(c) => c.fmt(f),
            Codeword::Rqq(c) => c.fmt(f),
            Codeword::Rqc(c) => c.fmt(f),
            Codeword::Samis(c) => c.fmt(f),
            Codeword::Traffic => write!(f, "TRAFFIC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use mpt_core::fcs;
    use mpt_core::ident::TSCI;

    use crate::enums::ack_function::AckFunction;

    use super::*;

    #[test]
    fn test_traffic_marker() {
        assert_eq!(Codeword::Traffic.encode(), 1);
        assert_eq!(Codeword::Traffic.to_wire(), 0xAAAA_AAAA_AAAA_3B28);
        assert_eq!(Codeword::Traffic.to_string(), "TRAFFIC");
    }

    #[test]
    fn test_wire_carries_fcs() {
        let cw = Codeword::Ack(Ack::new(AckFunction::Ack, 0, TSCI, 1234));
        let wire = cw.to_wire();
        assert_eq!(wire >> 16, 0x80ff_f420_9a40);
        assert_eq!((wire & 0xFFFF) as u16, fcs(0x80ff_f420_9a40));

        let ccsc = Codeword::Ccsc(Ccsc::new(0x4A89));
        assert_eq!(ccsc.to_wire(), 0x4A89_740B_AAAA_C4D7);
    }

    #[test]
    fn test_display_delegates() {
        let cw = Codeword::Ccsc(Ccsc::new(0x3201));
        assert_eq!(cw.to_string(), "CCSC[syscode=0x3201]");
    }
}
