//! Dashboard display task
//!
//! Applies encoder events to the dashboard, expires its markers on a
//! refresh tick and sends changed frames to the OLED.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use rotenc_display::Dashboard;

use crate::channels::EVENT_CHANNEL;
use crate::framebuffer::FrameBuffer;
use crate::ssd1306::Ssd1306;

/// Refresh interval for marker and RPM expiry
pub const REFRESH_INTERVAL_MS: u64 = 10;

/// Panel driver type used by the firmware
pub type Oled = Ssd1306<I2c<'static, I2C0, Async>>;

/// Display task - owns the dashboard and the panel
#[embassy_executor::task]
pub async fn display_task(mut oled: Oled, mut dashboard: Dashboard) {
    info!("Display task started");

    let mut frame = FrameBuffer::new();
    let mut refresh = Ticker::every(Duration::from_millis(REFRESH_INTERVAL_MS));

    loop {
        match select(EVENT_CHANNEL.receive(), refresh.next()).await {
            Either::First(event) => dashboard.handle_event(&event, Instant::now().as_millis()),
            Either::Second(()) => dashboard.tick(Instant::now().as_millis()),
        }

        if let Err(e) = dashboard.render(&mut frame) {
            warn!("Dashboard render failed: {:?}", e);
            continue;
        }

        if frame.take_committed() {
            match oled.write_frame(&frame).await {
                Ok(()) => trace!("Display updated"),
                Err(e) => {
                    warn!("Display write failed: {:?}", e);
                    dashboard.mark_dirty();
                }
            }
        }
    }
}
