use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::info;

use super::{ReaderSource, SourceError, layout};

/// Serial line settings. TSIP runs 8-N-1 without flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: layout::DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(layout::SERIAL_READ_TIMEOUT_MS),
        }
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Open a serial device in raw mode and wrap it as a byte source.
pub fn open_serial(config: &SerialConfig) -> Result<ReaderSource<Box<dyn SerialPort>>, SourceError> {
    let port = serialport::new(&config.path, config.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(config.timeout)
        .open()
        .map_err(|err| SourceError::Serial {
            path: config.path.clone(),
            message: err.to_string(),
        })?;
    info!(path = %config.path, baud_rate = config.baud_rate, "serial port opened");
    Ok(ReaderSource::new(port))
}

#[cfg(test)]
mod tests {
    use super::{SerialConfig, open_serial};
    use crate::source::SourceError;

    #[test]
    fn config_defaults_to_tsip_line_rate() {
        let config = SerialConfig::new("/dev/ttyS1");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.baud_rate(38_400).baud_rate, 38_400);
    }

    #[test]
    fn missing_device_is_a_serial_error() {
        let config = SerialConfig::new("/dev/tsip-core-test-missing-device");
        let err = match open_serial(&config) {
            Ok(_) => panic!("expected missing device to fail"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Serial { .. }));
        assert!(err.to_string().contains("tsip-core-test-missing-device"));
    }
}
