use crate::config::Config;
use crate::constants::ASSET_WINDOW_NAME;
use crate::events::{Event, EventBus};
use crate::services::{
    LocalSession, SessionProvider, SharedSessionSlot, SimulatedStatistics, StatisticsProvider,
};
use crate::ui::{AssetWindow, StatisticsWidget};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Headless host: owns the bus and providers and drives the update loop.
pub struct TilescopeApp {
    config: Config,
    bus: Arc<EventBus>,
    sessions: Arc<SharedSessionSlot>,
    statistics: Arc<dyn StatisticsProvider>,
}

impl TilescopeApp {
    pub fn new(config: Config) -> Result<Self> {
        let bus = Arc::new(EventBus::new(config.events.history_size));
        let sessions = Arc::new(SharedSessionSlot::new());

        if config.session.enabled {
            let session = match &config.session.assets_fixture {
                Some(path) => LocalSession::from_fixture(Arc::downgrade(&bus), path)
                    .with_context(|| format!("Failed to load asset fixture {:?}", path))?,
                None => LocalSession::with_sample_assets(Arc::downgrade(&bus)),
            };
            sessions.set(Arc::new(session));
        } else {
            info!("Starting without a session");
        }

        Ok(Self {
            config,
            bus,
            sessions,
            statistics: Arc::new(SimulatedStatistics::new()),
        })
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn sessions(&self) -> &Arc<SharedSessionSlot> {
        &self.sessions
    }

    /// Run the update loop until Ctrl-C or the configured frame limit.
    ///
    /// Returns the number of frames ticked.
    pub async fn run(self) -> Result<u64> {
        let sessions: Arc<dyn SessionProvider> = self.sessions.clone();
        let mut asset_window = AssetWindow::new(&self.bus, sessions)?;
        let mut statistics_widget = StatisticsWidget::new(&self.bus, self.statistics.clone())?;
        statistics_widget.set_visible(self.config.ui.statistics_visible);

        let frame_interval = Duration::from_millis(self.config.ui.frame_interval_ms.max(1));
        let render_every = self.config.ui.render_every_frames.max(1);
        let max_frames = self.config.run.max_frames;

        let mut interval = tokio::time::interval(frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!(
            "Update loop running every {:?}{}",
            frame_interval,
            if max_frames > 0 {
                format!(" for {} frames", max_frames)
            } else {
                String::new()
            }
        );

        let mut frame: u64 = 0;
        let mut last_tick = Instant::now();

        let result = loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Instant::now();
                    self.bus.post(Event::update_frame(frame, now - last_tick));
                    last_tick = now;
                    self.bus.pump();

                    if asset_window.tree_mut().sync() {
                        info!("{}\n{}", ASSET_WINDOW_NAME, asset_window.tree().render());
                    }
                    if statistics_widget.is_visible() && frame % render_every == 0 {
                        info!("Statistics (frame {})\n{}", frame, statistics_widget.render());
                    }

                    frame += 1;
                    if max_frames > 0 && frame >= max_frames {
                        break Ok(());
                    }
                }
                signal = &mut shutdown => {
                    info!("Shutdown requested");
                    break signal.context("Failed to listen for Ctrl-C");
                }
            }
        };

        asset_window.destroy();
        statistics_widget.destroy();
        self.bus.close();

        let stats = self.bus.get_stats();
        info!(
            "Stopped after {} frames ({} events delivered, {} dropped)",
            frame, stats.delivered_events, stats.dropped_events
        );

        result.map(|_| frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn quick_config(max_frames: u64) -> Config {
        let mut config = Config::default();
        config.ui.frame_interval_ms = 1;
        config.ui.render_every_frames = 1000;
        config.run.max_frames = max_frames;
        config
    }

    #[tokio::test]
    async fn test_run_stops_at_frame_limit() {
        let app = TilescopeApp::new(quick_config(5)).unwrap();
        let bus = app.bus().clone();

        let frames = app.run().await.unwrap();
        assert_eq!(frames, 5);
        assert!(bus.is_closed());
        assert_eq!(bus.subscriber_count(), 0);

        let stats = bus.get_stats();
        // 5 frames plus the initial assets update
        assert_eq!(stats.total_events, 6);
    }

    #[tokio::test]
    async fn test_run_without_session() {
        let mut config = quick_config(2);
        config.session.enabled = false;

        let app = TilescopeApp::new(config).unwrap();
        assert!(!app.sessions().is_connected());
        let bus = app.bus().clone();

        assert_eq!(app.run().await.unwrap(), 2);
        assert_eq!(bus.get_stats().total_events, 2);
    }

    #[test]
    fn test_missing_fixture_fails() {
        let mut config = quick_config(1);
        config.session.assets_fixture = Some("/nonexistent/assets.json".into());

        assert!(TilescopeApp::new(config).is_err());
    }

    #[tokio::test]
    async fn test_panels_are_rendered_through_tracing() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = TilescopeApp::new(quick_config(1)).unwrap();
        app.run().await.unwrap();

        let output = log.contents();
        assert!(output.contains(ASSET_WINDOW_NAME));
        assert!(output.contains("Statistics (frame 0)"));
        assert!(output.contains("Materials capacity"));
    }
}
