//! Encoder dashboard
//!
//! Keeps the visible state of the demo screen and redraws it on demand.
//! Events and [`tick`](Dashboard::tick) only mutate state and set the dirty
//! flag; [`render`](Dashboard::render) draws a full frame and flushes it.

use core::fmt::Write;

use heapless::String;
use rotenc_core::EncoderEvent;

use crate::backend::{DisplayBackend, DisplayError};

/// Panel width in pixels
pub const SCREEN_WIDTH: u16 = 128;

/// Panel height in pixels
pub const SCREEN_HEIGHT: u16 = 32;

/// How long a marker stays lit after its event (ms)
pub const MARKER_HOLD_MS: u64 = 100;

/// Quiet time after which the speed readout drops to zero (ms)
pub const RPM_IDLE_MS: u64 = 50;

const MARKER_SIDE: u16 = 4;
const MARKER_Y: u16 = 18;
const INDICATOR_Y: u16 = 24;
const INDICATOR_WIDTH: u16 = 4;
const INDICATOR_HEIGHT: u16 = 8;
const INDICATOR_HOME: u16 = SCREEN_WIDTH / 2 - INDICATOR_WIDTH / 2;
const INDICATOR_MAX: u16 = SCREEN_WIDTH - INDICATOR_WIDTH;

const RPM_ROW: u8 = 2;

/// Event markers on the right half of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Marker {
    /// Counter-clockwise rotation
    Left,
    /// Button press
    Center,
    /// Clockwise rotation
    Right,
}

impl Marker {
    const ALL: [Marker; 3] = [Marker::Left, Marker::Center, Marker::Right];

    const fn index(self) -> usize {
        match self {
            Marker::Left => 0,
            Marker::Center => 1,
            Marker::Right => 2,
        }
    }

    /// Top-left corner of the filled square
    pub const fn origin(self) -> (u16, u16) {
        let x = match self {
            Marker::Left => SCREEN_WIDTH / 2 + 2,
            Marker::Center => SCREEN_WIDTH / 2 + SCREEN_WIDTH / 4 - 2,
            Marker::Right => SCREEN_WIDTH - 6,
        };
        (x, MARKER_Y)
    }
}

/// Encoder demo screen
pub struct Dashboard {
    title: &'static str,
    subtitle: &'static str,
    rpm: i32,
    /// Time of the last rotation event (ms)
    last_rotation_ms: u64,
    /// Per-marker expiry time while lit
    lit_until: [Option<u64>; 3],
    indicator_x: u16,
    dirty: bool,
}

impl Dashboard {
    /// Create a dashboard with two header lines
    pub const fn new(title: &'static str, subtitle: &'static str) -> Self {
        Self {
            title,
            subtitle,
            rpm: 0,
            last_rotation_ms: 0,
            lit_until: [None; 3],
            indicator_x: INDICATOR_HOME,
            dirty: true,
        }
    }

    /// Rotation reported by the encoder
    pub fn on_turned(&mut self, delta_clicks: i32, rpm: i32, now_ms: u64) {
        self.rpm = rpm;
        self.last_rotation_ms = now_ms;

        if delta_clicks > 0 {
            self.light(Marker::Right, now_ms);
            self.step_indicator(true);
        } else if delta_clicks < 0 {
            self.light(Marker::Left, now_ms);
            self.step_indicator(false);
        }
        self.dirty = true;
    }

    /// Button press reported by the encoder
    pub fn on_clicked(&mut self, now_ms: u64) {
        self.light(Marker::Center, now_ms);
        self.indicator_x = INDICATOR_HOME;
        self.dirty = true;
    }

    /// Apply an encoder event received at `now_ms`
    pub fn handle_event(&mut self, event: &EncoderEvent, now_ms: u64) {
        match *event {
            EncoderEvent::Turned {
                delta_clicks, rpm, ..
            } => self.on_turned(delta_clicks, rpm, now_ms),
            EncoderEvent::Clicked { .. } => self.on_clicked(now_ms),
        }
    }

    /// Expire markers and the speed readout
    pub fn tick(&mut self, now_ms: u64) {
        for slot in &mut self.lit_until {
            if matches!(*slot, Some(until) if now_ms >= until) {
                *slot = None;
                self.dirty = true;
            }
        }

        if self.rpm != 0 && now_ms.saturating_sub(self.last_rotation_ms) > RPM_IDLE_MS {
            self.rpm = 0;
            self.dirty = true;
        }
    }

    /// Draw and flush the frame if anything changed
    ///
    /// Returns whether a frame was sent.
    pub fn render<D: DisplayBackend>(&mut self, display: &mut D) -> Result<bool, DisplayError> {
        if !self.dirty {
            return Ok(false);
        }

        display.clear()?;
        display.draw_text(0, 0, self.title)?;
        display.draw_text(1, 0, self.subtitle)?;

        let mut readout: String<16> = String::new();
        // Capacity covers any i32
        let _ = write!(readout, "RPM: {:4}", self.rpm);
        display.draw_text(RPM_ROW, 0, &readout)?;

        for marker in Marker::ALL {
            let (x, y) = marker.origin();
            display.draw_rect(x - 2, y - 2, MARKER_SIDE + 4, MARKER_SIDE + 4)?;
            if self.is_lit(marker) {
                display.fill_rect(x, y, MARKER_SIDE, MARKER_SIDE)?;
            }
        }

        display.draw_rect(
            self.indicator_x,
            INDICATOR_Y,
            INDICATOR_WIDTH,
            INDICATOR_HEIGHT,
        )?;
        display.flush()?;

        self.dirty = false;
        Ok(true)
    }

    /// Speed currently shown
    pub fn rpm(&self) -> i32 {
        self.rpm
    }

    /// Left edge of the position indicator
    pub fn indicator_x(&self) -> u16 {
        self.indicator_x
    }

    /// Whether a marker is currently lit
    pub fn is_lit(&self, marker: Marker) -> bool {
        self.lit_until[marker.index()].is_some()
    }

    /// Check if the screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn light(&mut self, marker: Marker, now_ms: u64) {
        self.lit_until[marker.index()] = Some(now_ms + MARKER_HOLD_MS);
    }

    fn step_indicator(&mut self, forward: bool) {
        self.indicator_x = match (forward, self.indicator_x) {
            (true, x) if x >= INDICATOR_MAX => 0,
            (true, x) => x + 1,
            (false, 0) => INDICATOR_MAX,
            (false, x) => x - 1,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use rotenc_core::EncoderId;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Clear,
        Text(u8, u8, String<24>),
        Rect(u16, u16, u16, u16),
        Fill(u16, u16, u16, u16),
        Flush,
    }

    #[derive(Default)]
    struct RecordingDisplay {
        ops: Vec<Op, 32>,
        fail_flush: bool,
    }

    impl RecordingDisplay {
        fn record(&mut self, op: Op) -> Result<(), DisplayError> {
            self.ops.push(op).map_err(|_| DisplayError::InvalidCoordinates)
        }

        fn fills(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Fill(..))).count()
        }

        fn text_at(&self, row: u8) -> Option<&str> {
            self.ops.iter().find_map(|op| match op {
                Op::Text(r, _, text) if *r == row => Some(text.as_str()),
                _ => None,
            })
        }
    }

    impl DisplayBackend for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.clear();
            self.record(Op::Clear)
        }

        fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            let mut owned = String::new();
            owned
                .push_str(text)
                .map_err(|_| DisplayError::InvalidCoordinates)?;
            self.record(Op::Text(row, col, owned))
        }

        fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), DisplayError> {
            self.record(Op::Rect(x, y, w, h))
        }

        fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), DisplayError> {
            self.record(Op::Fill(x, y, w, h))
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Communication);
            }
            self.record(Op::Flush)
        }

        fn pixel_dimensions(&self) -> (u16, u16) {
            (SCREEN_WIDTH, SCREEN_HEIGHT)
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new("rot-enc-test", "v0.1.0")
    }

    #[test]
    fn test_initial_frame() {
        let mut dash = dashboard();
        let mut display = RecordingDisplay::default();

        assert_eq!(dash.render(&mut display), Ok(true));

        assert_eq!(display.ops.first(), Some(&Op::Clear));
        assert_eq!(display.ops.last(), Some(&Op::Flush));
        assert_eq!(display.text_at(0), Some("rot-enc-test"));
        assert_eq!(display.text_at(1), Some("v0.1.0"));
        assert_eq!(display.text_at(2), Some("RPM:    0"));
        assert_eq!(display.fills(), 0);
        assert!(display.ops.contains(&Op::Rect(64, 16, 8, 8)));
        assert!(display.ops.contains(&Op::Rect(92, 16, 8, 8)));
        assert!(display.ops.contains(&Op::Rect(120, 16, 8, 8)));
        assert!(display.ops.contains(&Op::Rect(62, 24, 4, 8)));
    }

    #[test]
    fn test_clean_dashboard_skips_render() {
        let mut dash = dashboard();
        let mut display = RecordingDisplay::default();

        dash.render(&mut display).unwrap();
        display.ops.clear();

        assert_eq!(dash.render(&mut display), Ok(false));
        assert!(display.ops.is_empty());
    }

    #[test]
    fn test_clockwise_lights_right_marker() {
        let mut dash = dashboard();
        let mut display = RecordingDisplay::default();

        dash.on_turned(3, 50, 1_000);
        dash.render(&mut display).unwrap();

        assert!(dash.is_lit(Marker::Right));
        assert!(!dash.is_lit(Marker::Left));
        assert_eq!(dash.indicator_x(), INDICATOR_HOME + 1);
        assert_eq!(display.text_at(2), Some("RPM:   50"));
        assert!(display.ops.contains(&Op::Fill(122, 18, 4, 4)));
    }

    #[test]
    fn test_counter_clockwise_lights_left_marker() {
        let mut dash = dashboard();

        dash.on_turned(-1, 60, 10);

        assert!(dash.is_lit(Marker::Left));
        assert_eq!(dash.indicator_x(), INDICATOR_HOME - 1);
    }

    #[test]
    fn test_zero_delta_updates_speed_only() {
        let mut dash = dashboard();

        dash.on_turned(0, 40, 10);

        assert_eq!(dash.rpm(), 40);
        assert_eq!(dash.indicator_x(), INDICATOR_HOME);
        assert!(Marker::ALL.iter().all(|m| !dash.is_lit(*m)));
    }

    #[test]
    fn test_marker_clears_after_hold() {
        let mut dash = dashboard();
        let mut display = RecordingDisplay::default();

        dash.on_clicked(1_000);
        dash.render(&mut display).unwrap();

        dash.tick(1_099);
        assert!(dash.is_lit(Marker::Center));
        assert!(!dash.is_dirty());

        dash.tick(1_100);
        assert!(!dash.is_lit(Marker::Center));
        assert!(dash.is_dirty());

        dash.render(&mut display).unwrap();
        assert_eq!(display.fills(), 0);
    }

    #[test]
    fn test_rpm_drops_to_zero_when_idle() {
        let mut dash = dashboard();

        dash.on_turned(1, 120, 500);
        dash.tick(550);
        assert_eq!(dash.rpm(), 120);

        dash.tick(551);
        assert_eq!(dash.rpm(), 0);
    }

    #[test]
    fn test_indicator_wraps_at_edges() {
        let mut dash = dashboard();

        for _ in 0..=INDICATOR_HOME {
            dash.on_turned(-1, 0, 0);
        }
        assert_eq!(dash.indicator_x(), INDICATOR_MAX);

        dash.on_turned(1, 0, 0);
        assert_eq!(dash.indicator_x(), 0);
    }

    #[test]
    fn test_click_recentres_indicator() {
        let mut dash = dashboard();

        dash.on_turned(1, 0, 0);
        dash.on_turned(1, 0, 0);
        dash.on_clicked(5);

        assert_eq!(dash.indicator_x(), INDICATOR_HOME);
    }

    #[test]
    fn test_handle_event() {
        let mut dash = dashboard();

        dash.handle_event(
            &EncoderEvent::Turned {
                source: EncoderId(0),
                delta_clicks: 2,
                rpm: 75,
            },
            20,
        );
        dash.handle_event(
            &EncoderEvent::Clicked {
                source: EncoderId(0),
            },
            30,
        );

        assert_eq!(dash.rpm(), 75);
        assert!(dash.is_lit(Marker::Right));
        assert!(dash.is_lit(Marker::Center));
    }

    #[test]
    fn test_failed_flush_keeps_frame_dirty() {
        let mut dash = dashboard();
        let mut display = RecordingDisplay {
            fail_flush: true,
            ..Default::default()
        };

        assert_eq!(
            dash.render(&mut display),
            Err(DisplayError::Communication)
        );
        assert!(dash.is_dirty());
    }
}
