//! Pulse-train shape of the status LED blink routine.

use super::mock_hw::{FaultyPin, HwEvent, MockDelay, MockPin, Timeline};

use thermostat::config::IndicatorConfig;
use thermostat::drivers::status_led::{Indication, StatusLed, flash_led};

fn flash(times: u32, wait_ms: u32) -> Timeline {
    let timeline = Timeline::new();
    flash_led(
        &mut MockPin::new(&timeline),
        &mut MockDelay::new(&timeline),
        times,
        wait_ms,
    )
    .unwrap();
    timeline
}

#[test]
fn three_pulses_have_two_gaps_and_end_low() {
    let t = flash(3, 100);
    assert_eq!(t.high_periods(), [100, 100, 100]);
    assert_eq!(t.low_gaps(), [100, 100]);
    assert_eq!(t.final_level(), Some(HwEvent::Low));
    assert_eq!(t.trailing_low_ms(), 0, "no delay after the last pulse");
}

#[test]
fn total_blocking_time_matches_pulse_train() {
    for times in 1..=5_u32 {
        let t = flash(times, 40);
        assert_eq!(t.total_wait_ms(), times * 2 * 40 - 40);
    }
}

#[test]
fn single_pulse_is_one_high_period() {
    let t = flash(1, 250);
    assert_eq!(
        t.events(),
        [HwEvent::High, HwEvent::WaitMs(250), HwEvent::Low]
    );
}

#[test]
fn zero_pulses_produce_no_transitions() {
    let t = flash(0, 100);
    assert!(t.events().is_empty());
}

#[test]
fn zero_wait_still_toggles() {
    let t = flash(2, 0);
    assert_eq!(t.high_periods(), [0, 0]);
    assert_eq!(t.final_level(), Some(HwEvent::Low));
}

#[test]
fn pin_fault_is_propagated() {
    let timeline = Timeline::new();
    let result = flash_led(&mut FaultyPin, &mut MockDelay::new(&timeline), 2, 10);
    assert!(result.is_err());
    assert!(timeline.events().is_empty(), "no wait after a failed edge");
}

#[test]
fn status_led_off_and_release() {
    let timeline = Timeline::new();
    let mut led = StatusLed::new(
        MockPin::new(&timeline),
        MockDelay::new(&timeline),
        IndicatorConfig::default(),
    );
    led.signal(Indication::Boot).unwrap();
    led.off().unwrap();
    assert_eq!(timeline.final_level(), Some(HwEvent::Low));

    let (mut pin, _delay) = led.release();
    embedded_hal::digital::OutputPin::set_high(&mut pin).unwrap();
    assert_eq!(timeline.final_level(), Some(HwEvent::High));
}
