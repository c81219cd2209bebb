/// Data Link Escape: frame start/end marker, doubled to escape a literal `0x10`.
pub const DLE: u8 = 0x10;
/// End of Text: terminates a frame when it follows an unescaped DLE.
pub const ETX: u8 = 0x03;

/// Default cap on buffered bytes while waiting for a frame terminator.
pub const DEFAULT_MAX_BUFFERED: usize = 4096;
/// Smallest cap that can still hold `<DLE> <id> <DLE>`.
pub const MIN_MAX_BUFFERED: usize = 3;
