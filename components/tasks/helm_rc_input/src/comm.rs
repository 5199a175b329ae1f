use helm_clock::Clock;
use helm_traits::{CommLink, HelmResult};
use log::debug;
use std::cell::Cell;

/// Sends every line to the `log` facade under the `helm::comm` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCommLink;

impl CommLink for LogCommLink {
    fn log(&self, line: &str) -> HelmResult<()> {
        debug!(target: "helm::comm", "{}", line);
        Ok(())
    }
}

/// Forwards at most one tick worth of lines per period to the wrapped link,
/// drops the rest.
///
/// The state machine reports every tick, far more often than a radio link or
/// a console wants to hear about it. All lines sent at the millisecond that
/// opened a window go through, so a tick is never cut in half.
pub struct ThrottledCommLink<C, L> {
    clock: C,
    inner: L,
    period_ms: u64,
    window_start_ms: Cell<Option<u64>>,
}

impl<C: Clock, L: CommLink> ThrottledCommLink<C, L> {
    pub fn new(clock: C, inner: L, period_ms: u64) -> Self {
        Self {
            clock,
            inner,
            period_ms,
            window_start_ms: Cell::new(None),
        }
    }

    fn should_send(&self, now: u64) -> bool {
        match self.window_start_ms.get() {
            Some(start) if now == start => true,
            Some(start) if now.saturating_sub(start) < self.period_ms => false,
            _ => {
                self.window_start_ms.set(Some(now));
                true
            }
        }
    }
}

impl<C: Clock, L: CommLink> CommLink for ThrottledCommLink<C, L> {
    fn log(&self, line: &str) -> HelmResult<()> {
        if !self.should_send(self.clock.millis()) {
            return Ok(());
        }
        self.inner.log(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_clock::BoardClock;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Sink(RefCell<Vec<String>>);

    impl CommLink for Sink {
        fn log(&self, line: &str) -> HelmResult<()> {
            self.0.borrow_mut().push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_log_link_never_fails() {
        assert!(LogCommLink.log("State: inactive").is_ok());
    }

    #[test]
    fn test_throttle_period() {
        let (clock, mock) = BoardClock::mock();
        let sink = Sink::default();
        let link = ThrottledCommLink::new(&clock, &sink, 100);

        link.log("a").unwrap();
        mock.increment_ms(50);
        link.log("b").unwrap();
        mock.increment_ms(50);
        link.log("c").unwrap();
        mock.increment_ms(99);
        link.log("d").unwrap();

        assert_eq!(*sink.0.borrow(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_throttle_keeps_whole_ticks() {
        let (clock, mock) = BoardClock::mock();
        let sink = Sink::default();
        let link = ThrottledCommLink::new(&clock, &sink, 100);

        link.log("State: inactive").unwrap();
        link.log("State: arm request received").unwrap();
        mock.increment_ms(20);
        link.log("State: inactive").unwrap();
        link.log("State: arm request received").unwrap();
        mock.increment_ms(80);
        link.log("State: being armed").unwrap();
        link.log("State: neutral request received").unwrap();

        assert_eq!(
            *sink.0.borrow(),
            vec![
                "State: inactive".to_string(),
                "State: arm request received".to_string(),
                "State: being armed".to_string(),
                "State: neutral request received".to_string(),
            ]
        );
    }
}
