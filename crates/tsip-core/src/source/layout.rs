/// Chunk size for reads from files, pipes and serial devices.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Line rate of the Resolution-T TSIP port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
/// Serial read timeout; timeouts are retried, not reported.
pub const SERIAL_READ_TIMEOUT_MS: u64 = 1000;

/// Command that relays raw receiver bytes from gpsd.
pub const GPSPIPE_PROGRAM: &str = "gpspipe";
pub const GPSPIPE_ARGS: &[&str] = &["-R"];
