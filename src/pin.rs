//! Digital pin wrapper with configurable polarity inversion
//!
//! The panel control lines are not wired the same way on every board: the
//! UC8179 busy line is active low on the reference design, and some carrier
//! boards invert chip select or reset. Rather than a type per polarity, the
//! wrapper carries a single `inverted` flag and applies it on both reads and
//! writes, so the rest of the driver only ever deals in logical levels
//! (busy asserted, select asserted, reset asserted).

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// A digital pin with optional signal inversion.
///
/// `is_high()` returns the logical level after applying the inversion;
/// `set_high()`/`set_low()` apply the inversion before driving the
/// physical line. Nothing else.
pub struct Pin<P> {
    inner: P,
    inverted: bool,
}

impl<P> Pin<P> {
    /// Wrap a pin without inversion.
    pub fn new(inner: P) -> Self {
        Pin {
            inner,
            inverted: false,
        }
    }

    /// Wrap a pin whose physical level is the inverse of the logical one.
    pub fn inverted(inner: P) -> Self {
        Pin {
            inner,
            inverted: true,
        }
    }

    /// Give the wrapped pin back.
    pub fn release(self) -> P {
        self.inner
    }
}

impl<P: ErrorType> ErrorType for Pin<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for Pin<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.inner.is_high()? != self.inverted)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|level| !level)
    }
}

impl<P: OutputPin> OutputPin for Pin<P> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.inverted {
            self.inner.set_low()
        } else {
            self.inner.set_high()
        }
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.inverted {
            self.inner.set_high()
        } else {
            self.inner.set_low()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn plain_pin_passes_levels_through() {
        let mut mock = PinMock::new(&[
            PinTransaction::get(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut pin = Pin::new(mock.clone());

        assert!(pin.is_high().unwrap());
        pin.set_low().unwrap();

        mock.done();
    }

    #[test]
    fn inverted_pin_flips_reads() {
        let mut mock = PinMock::new(&[
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ]);
        let mut pin = Pin::inverted(mock.clone());

        // Physical high reads as logically low and vice versa
        assert!(!pin.is_high().unwrap());
        assert!(pin.is_high().unwrap());

        mock.done();
    }

    #[test]
    fn inverted_pin_flips_writes() {
        let mut mock = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut pin = Pin::inverted(mock.clone());

        pin.set_high().unwrap();
        pin.set_low().unwrap();

        mock.done();
    }

    #[test]
    fn is_low_is_the_complement_of_is_high() {
        let mut mock = PinMock::new(&[PinTransaction::get(PinState::Low)]);
        let mut pin = Pin::inverted(mock.clone());

        // Physical low, inverted -> logically high -> is_low is false
        assert!(!pin.is_low().unwrap());

        mock.done();
    }
}
