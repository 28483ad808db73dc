/// Possible errors from the DHT11 driver.
///
/// Pulse timeouts and checksum mismatches within a single attempt are
/// expected protocol outcomes and are reported as `false` from
/// [`try_read`](crate::Dht11::try_read) rather than as errors; only a GPIO
/// fault or running out of retries surfaces here.
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// Every read attempt failed within the retry budget.
    ReadExhausted,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}
