use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::Result;

use crate::config::{MonitorSettings, live_ws_url};
use crate::data::{HistoryProvider, HttpHistoryProvider, LiveStreamManager};
use crate::domain::ViewMode;

use super::messages::{Effect, HistoryRequest, HistoryResponse, LiveEvent};
use super::view_controller::ViewController;
use super::worker;

/// Glue between the synchronous `ViewController` and the two asynchronous sources.
/// Lives on the UI thread; `update` is called once per frame.
pub struct MonitorEngine {
    view: ViewController,

    /// Live Data Feed
    live_stream: LiveStreamManager,
    live_tx: Sender<LiveEvent>,
    live_rx: Receiver<LiveEvent>,

    history_tx: Sender<HistoryRequest>,
    history_rx: Receiver<HistoryResponse>,
}

impl MonitorEngine {
    /// Engine talking to a real backend at `server_url`.
    pub fn new(server_url: &str, settings: &MonitorSettings, auto_refresh: bool) -> Result<Self> {
        let provider = HttpHistoryProvider::new(server_url)?;
        Ok(Self::with_provider(
            live_ws_url(server_url),
            Arc::new(provider),
            settings,
            auto_refresh,
        ))
    }

    pub fn with_provider(
        live_url: String,
        provider: Arc<dyn HistoryProvider>,
        settings: &MonitorSettings,
        auto_refresh: bool,
    ) -> Self {
        let (live_tx, live_rx) = channel();
        let (history_tx, request_rx) = channel::<HistoryRequest>();
        let (response_tx, history_rx) = channel::<HistoryResponse>();

        worker::spawn_history_worker(request_rx, response_tx, provider);

        Self {
            view: ViewController::new(settings, auto_refresh),
            live_stream: LiveStreamManager::new(live_url),
            live_tx,
            live_rx,
            history_tx,
            history_rx,
        }
    }

    pub fn start(&mut self, mode: ViewMode) {
        let effects = self.view.start(mode);
        self.execute(effects);
    }

    /// Drain both channels into the view. Returns true if anything was applied.
    pub fn update(&mut self) -> bool {
        let mut changed = false;

        // Live events one at a time, in arrival order.
        while let Ok(event) = self.live_rx.try_recv() {
            changed |= self.view.apply_live_event(event);
        }

        while let Ok(response) = self.history_rx.try_recv() {
            changed |= self.view.apply_history(response);
        }
        changed
    }

    pub fn change_mode(&mut self, mode: ViewMode) {
        let effects = self.view.change_mode(mode);
        self.execute(effects);
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        let effects = self.view.set_auto_refresh(enabled);
        self.execute(effects);
    }

    pub fn clear_buffer(&mut self) {
        self.view.clear_buffer();
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Input events that need no boundary work (drag, zoom reset) go straight to the view.
    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    pub fn is_streaming(&self) -> bool {
        self.live_stream.is_running()
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchHistory(req) => {
                    if self.history_tx.send(req).is_err() {
                        log::error!("History worker is gone; cannot fetch {}", req.mode);
                        self.view.apply_history(HistoryResponse {
                            generation: req.generation,
                            mode: req.mode,
                            duration_ms: 0,
                            result: Err("history worker unavailable".to_string()),
                        });
                    }
                }
                Effect::ConnectLive { session } => {
                    self.live_stream.connect(session, self.live_tx.clone());
                }
                Effect::DisconnectLive => self.live_stream.disconnect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataPoint;
    use async_trait::async_trait;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct FixedHistory {
        latency: Duration,
        completed: std::sync::Mutex<Vec<ViewMode>>,
    }

    #[async_trait]
    impl HistoryProvider for FixedHistory {
        async fn fetch(&self, mode: ViewMode) -> Result<Vec<DataPoint>> {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.completed.lock().unwrap().push(mode);
            let n = match mode {
                ViewMode::OneHour => 12,
                _ => 3,
            };
            Ok((0..n)
                .map(|i| DataPoint::new(format!("10:{:02}:00", i), Some(100.0), 95.0, 105.0))
                .collect())
        }
    }

    fn engine_with(provider: Arc<FixedHistory>) -> MonitorEngine {
        MonitorEngine::with_provider(
            "ws://127.0.0.1:9/ws/live".into(),
            provider,
            &MonitorSettings::default(),
            false,
        )
    }

    fn engine() -> MonitorEngine {
        engine_with(Arc::new(FixedHistory::default()))
    }

    fn pump_until_loaded(engine: &mut MonitorEngine) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while engine.view().is_loading() && Instant::now() < deadline {
            engine.update();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn history_round_trips_through_worker() {
        let mut engine = engine();
        engine.start(ViewMode::Live);
        assert!(!engine.is_streaming());

        engine.change_mode(ViewMode::OneHour);
        pump_until_loaded(&mut engine);
        assert_eq!(engine.view().displayed().len(), 12);
    }

    #[test]
    fn auto_refresh_drives_the_stream() {
        let mut engine = engine();
        engine.start(ViewMode::Live);
        engine.set_auto_refresh(true);
        assert!(engine.is_streaming());
        engine.change_mode(ViewMode::SixHours);
        assert!(!engine.is_streaming());
        pump_until_loaded(&mut engine);
        assert_eq!(engine.view().displayed().len(), 3);
    }

    #[test]
    fn rapid_mode_changes_load_only_the_last_range() {
        let latency = Duration::from_millis(400);
        let provider = Arc::new(FixedHistory {
            latency,
            ..Default::default()
        });
        let mut engine = engine_with(provider.clone());
        engine.start(ViewMode::Live);

        let started = Instant::now();
        engine.change_mode(ViewMode::OneHour);
        engine.change_mode(ViewMode::SixHours);
        engine.change_mode(ViewMode::TwentyFourHours);
        pump_until_loaded(&mut engine);
        let elapsed = started.elapsed();

        assert_eq!(engine.view().mode(), ViewMode::TwentyFourHours);
        assert_eq!(engine.view().displayed().len(), 3);
        assert!(
            elapsed < latency + Duration::from_millis(300),
            "last range loaded after {:?}",
            elapsed
        );
        assert_eq!(*provider.completed.lock().unwrap(), vec![ViewMode::TwentyFourHours]);
    }
}
