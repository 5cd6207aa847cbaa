/// Symbol version, 1 through 40
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version
    pub const MIN: Version = Version(1);
    /// Largest version
    pub const MAX: Version = Version(40);

    /// Wrap a version number, `None` outside 1..=40
    pub fn new(number: i32) -> Option<Self> {
        (1..=40).contains(&number).then_some(Version(number as u8))
    }

    /// Version whose side length is `size` modules
    pub fn from_module_count(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        Self::new(((size - 17) / 4) as i32)
    }

    /// Version number
    pub fn number(self) -> u8 {
        self.0
    }

    /// Side length in modules, `17 + 4v`
    pub fn module_count(self) -> usize {
        17 + 4 * self.0 as usize
    }

    /// Versions 7 and above carry version information blocks
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    /// Iterate every version
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in capacity-table order
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Level from the two format-information indicator bits (00=M, 01=L, 10=H, 11=Q)
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => ECLevel::M,
            0b01 => ECLevel::L,
            0b10 => ECLevel::H,
            _ => ECLevel::Q,
        }
    }

    /// Inverse of [`ECLevel::from_format_bits`]
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::M => 0b00,
            ECLevel::L => 0b01,
            ECLevel::H => 0b10,
            ECLevel::Q => 0b11,
        }
    }

    /// Row index into the capacity tables
    pub fn table_index(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

/// Mask pattern (0-7), evaluated at column `x`, row `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (y/2 + x/3) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x+y)%2 + (x*y)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Pattern from the three mask bits of the format information
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Three-bit reference
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the module at column `x`, row `y` is inverted by this mask
    pub fn is_masked(self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (y / 2 + x / 3) % 2 == 0,
            MaskPattern::Pattern5 => (x * y) % 2 + (x * y) % 3 == 0,
            MaskPattern::Pattern6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        }
    }
}

/// Version, level and mask of one decoded symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Symbol version
    pub version: Version,
    /// Error correction level from the format information
    pub ec_level: ECLevel,
    /// Data mask from the format information
    pub mask: MaskPattern,
}

/// One Reed-Solomon block after correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedBlock {
    /// Data codewords, error-correction codewords stripped
    pub data: Vec<u8>,
    /// Number of error-correction codewords the block carried
    pub ecc_len: usize,
    /// Codewords repaired in this block
    pub corrected: usize,
}

/// Result of a successful decode: corrected data codewords plus symbol metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Version, level and mask
    pub info: SymbolInfo,
    /// Concatenated data codewords of every block, in block order
    pub data: Vec<u8>,
    /// Per-block breakdown
    pub blocks: Vec<CorrectedBlock>,
    /// Total codewords repaired across all blocks
    pub corrected_errors: usize,
}
