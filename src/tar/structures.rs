/// Size of one record in a tar stream. Headers occupy exactly one record.
pub const RECORD_SIZE: usize = 512;

/// One raw record as read from the archive.
pub type Record = [u8; RECORD_SIZE];

/// POSIX ustar magic.
pub const USTAR_MAGIC: &[u8; 6] = b"ustar\0";
/// Old GNU magic, accepted for interoperability.
pub const GNU_MAGIC: &[u8; 6] = b"ustar ";

/// Regular file.
pub const REGTYPE: u8 = b'0';
/// Regular file, pre-POSIX producers.
pub const AREGTYPE: u8 = b'\0';

// Field layout of a ustar header record
const NAME: std::ops::Range<usize> = 0..100;
const SIZE: std::ops::Range<usize> = 124..136;
const TYPEFLAG: usize = 156;
const MAGIC: std::ops::Range<usize> = 257..263;

/// Returns the number of records a payload of `size` bytes occupies.
pub fn record_count(size: u64) -> u64 {
    size.div_ceil(RECORD_SIZE as u64)
}

/// Returns true iff every byte of the record is zero.
pub fn is_all_zero(block: &Record) -> bool {
    block.iter().all(|&b| b == 0)
}

/// Parses an octal number the way `strtoull(_, _, 8)` does.
///
/// Leading whitespace and a `+` sign are skipped, digits are consumed until
/// the first non-octal byte. Text with no digits yields 0. Overflow saturates.
pub fn parse_octal(field: &[u8]) -> u64 {
    let mut digits = field
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .peekable();
    if digits.peek() == Some(&&b'+') {
        digits.next();
    }

    let mut value = 0u64;
    for &c in digits {
        if !(b'0'..=b'7').contains(&c) {
            break;
        }
        value = value
            .saturating_mul(8)
            .saturating_add(u64::from(c - b'0'));
    }
    value
}

/// Metadata of one archive entry, decoded field by field from its header
/// record. Decoding never fails; validity is checked separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub name: [u8; 100],
    pub size: [u8; 12],
    pub typeflag: u8,
    pub magic: [u8; 6],
}

impl HeaderBlock {
    pub fn parse(block: &Record) -> Self {
        let mut header = HeaderBlock {
            name: [0; 100],
            size: [0; 12],
            typeflag: block[TYPEFLAG],
            magic: [0; 6],
        };
        header.name.copy_from_slice(&block[NAME]);
        header.size.copy_from_slice(&block[SIZE]);
        header.magic.copy_from_slice(&block[MAGIC]);
        header
    }

    pub fn is_magic_valid(&self) -> bool {
        &self.magic == USTAR_MAGIC || &self.magic == GNU_MAGIC
    }

    pub fn is_supported_type(&self) -> bool {
        self.typeflag == REGTYPE || self.typeflag == AREGTYPE
    }

    /// Payload size in bytes. Malformed octal text yields 0.
    pub fn size(&self) -> u64 {
        parse_octal(&self.size)
    }

    /// Name bytes up to the first NUL, at most the full 100-byte field.
    pub fn name_bytes(&self) -> &[u8] {
        let len = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.name.len());
        &self.name[..len]
    }

    /// Name for display and output creation. Non-UTF-8 bytes are replaced.
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }
}
