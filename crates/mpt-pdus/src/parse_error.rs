#[derive(Debug, PartialEq, Eq)]
pub enum CodewordParseErr {
    /// The fixed header bits (address flag, category, type, function) do not match
    InvalidHeader { expected: u64, found: u64 },
    InvalidValue { field: &'static str, value: u64 },
}

impl core::fmt::Display for CodewordParseErr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodewordParseErr::InvalidHeader { expected, found } => {
                write!(f, "invalid header: expected 0x{:012x}, found 0x{:012x}", expected, found)
            }
            CodewordParseErr::InvalidValue { field, value } => write!(f, "invalid value for {}: {}", field, value),
        }
    }
}

impl std::error::Error for CodewordParseErr {}

/// Checks the bits of `cw` selected by `mask` against `expected`.
/// If they differ, returns CodewordParseErr::InvalidHeader
#[inline]
pub fn expect_header(cw: u64, mask: u64, expected: u64) -> Result<(), CodewordParseErr> {
    let found = cw & mask;
    if found == expected {
        Ok(())
    } else {
        Err(CodewordParseErr::InvalidHeader { expected, found })
    }
}
