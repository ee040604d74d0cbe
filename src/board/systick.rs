//! SysTick busy-wait delay exposed as an `embedded-hal` 1.0 [`DelayNs`].

use cortex_m::delay::Delay;
use cortex_m::peripheral::SYST;
use embedded_hal::delay::DelayNs;

pub struct SysTickDelay {
    inner: Delay,
}

impl SysTickDelay {
    pub fn new(syst: SYST, sysclk_hz: u32) -> Self {
        Self {
            inner: Delay::new(syst, sysclk_hz),
        }
    }
}

impl DelayNs for SysTickDelay {
    fn delay_ns(&mut self, ns: u32) {
        // SysTick resolution here is a microsecond; round up.
        self.inner.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
