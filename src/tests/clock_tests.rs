#[cfg(test)]
mod tests {
    use crate::clock::GameClock;
    use std::time::Duration;

    const FAR: Duration = Duration::from_secs(3600);

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = GameClock::new();
        assert!(!clock.is_running());
        assert!(!clock.poll());
        assert!(!clock.poll_once());
    }

    #[test]
    fn poll_fires_only_after_the_deadline() {
        let mut clock = GameClock::new();
        clock.start(FAR);
        assert!(clock.is_running());
        assert!(!clock.poll(), "deadline is an hour away");

        // An already-elapsed deadline fires immediately and re-arms
        clock.reschedule(Duration::ZERO);
        assert!(clock.poll());
        assert!(clock.is_running(), "repeating poll re-arms itself");
        assert!(clock.poll());
    }

    #[test]
    fn stop_is_unconditional() {
        let mut clock = GameClock::new();
        clock.start(Duration::ZERO);
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.poll(), "a stray poll after stop is a no-op");
    }

    #[test]
    fn reschedule_rearms_from_now() {
        let mut clock = GameClock::new();
        clock.start(Duration::ZERO);
        assert!(clock.poll());

        // Re-arming with a long interval pushes the next fire out
        clock.reschedule(FAR);
        assert!(!clock.poll());
    }

    #[test]
    fn poll_once_disarms_after_firing() {
        let mut clock = GameClock::new();
        clock.start(Duration::ZERO);
        assert!(clock.poll_once());
        assert!(!clock.is_running());
        assert!(!clock.poll_once());
    }
}
