use thiserror::Error;

/// Failure reported by an [`IrTransmitter`](super::IrTransmitter).
#[derive(Debug, Error)]
pub enum TransmitterError {
    /// The device (serial port, LIRC socket, GPIO file) failed a write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transmitter rejected command: {reason}")]
    Rejected { reason: String },
}
