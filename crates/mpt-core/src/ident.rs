//! 13-bit MPT1327 identities and the reserved values at the top of the range.

/// A radio unit, group or reserved system identity. Only the low 13 bits are used.
pub type Ident = u16;

pub const IDENT_MASK: u16 = 0x1FFF;

/// System wide ident
pub const ALLI: Ident = 8191;
/// Ident of the TSC
pub const TSCI: Ident = 8190;
/// Interprefix ident
pub const IPFIXI: Ident = 8189;
/// Short data message ident
pub const SDMI: Ident = 8188;
/// Divert ident
pub const DIVERTI: Ident = 8187;
/// Include ident
pub const INCI: Ident = 8186;
/// Registration ident
pub const REGI: Ident = 8185;
/// Data network gateway ident
pub const DNI: Ident = 8103;
/// PABX gateway ident
pub const PABXI: Ident = 8102;
/// General PSTN gateway ident
pub const PSTNGI: Ident = 8101;
/// Dummy ident
pub const DUMMYI: Ident = 0;

/// Name of a reserved ident, if `ident` is one
pub fn ident_name(ident: Ident) -> Option<&'static str> {
    match ident & IDENT_MASK {
        ALLI => Some("ALLI"),
        TSCI => Some("TSCI"),
        IPFIXI => Some("IPFIXI"),
        SDMI => Some("SDMI"),
        DIVERTI => Some("DIVERTI"),
        INCI => Some("INCI"),
        REGI => Some("REGI"),
        DNI => Some("DNI"),
        PABXI => Some("PABXI"),
        PSTNGI => Some("PSTNGI"),
        DUMMYI => Some("DUMMYI"),
        _ => None,
    }
}

/// True for idents that address a radio unit or group rather than a system function
#[inline]
pub fn is_unit_or_group(ident: Ident) -> bool {
    let ident = ident & IDENT_MASK;
    ident != DUMMYI && ident < PSTNGI
}

/// Renders an ident as four digits plus the reserved name, e.g. `8190(TSCI)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentDisplay(pub Ident);

impl core::fmt::Display for IdentDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match ident_name(self.0) {
            Some(name) => write!(f, "{:04}({})", self.0, name),
            None => write!(f, "{:04}", self.0),
        }
    }
}
