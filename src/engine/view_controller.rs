use crate::analysis::{
    DeviationAnalyzer, DeviationRecord, TickPlanner, TrendWindow,
    summary::{self, PointReport, SelectionSummary},
};
use crate::config::MonitorSettings;
use crate::domain::{DataPoint, ModelKey, ViewMode, ZoomRange};

use super::live_buffer::LiveStreamBuffer;
use super::messages::{ConnectionStatus, Effect, HistoryRequest, HistoryResponse, LiveEvent};
use super::range_selector::{CommitOutcome, RangeSelector, SelectionDraft};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Owns the view mode and decides which series is on screen.
///
/// Single-threaded and synchronous: boundary work (fetches, connections) is returned as
/// `Effect`s for the owner to carry out, and their completions come back through
/// `apply_history` / `apply_live_event`.
#[derive(Debug, Clone)]
pub struct ViewController {
    mode: ViewMode,
    buffer: LiveStreamBuffer,
    /// Replaced wholesale by each accepted fetch. Never merged.
    history: Vec<DataPoint>,
    selector: RangeSelector,

    /// Bumped on every mode change. Only the response for the current generation is applied.
    generation: u64,
    is_loading: bool,
    last_error: Option<String>,

    auto_refresh: bool,
    /// Bumped on every connect/disconnect. Events from any other session are ignored.
    live_session: u64,
    live_connected: bool,
    connection: ConnectionStatus,

    analyzer: DeviationAnalyzer,
    trend: TrendWindow,
    ticks: TickPlanner,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(&MonitorSettings::default(), true)
    }
}

impl ViewController {
    pub fn new(settings: &MonitorSettings, auto_refresh: bool) -> Self {
        Self {
            mode: ViewMode::Live,
            buffer: LiveStreamBuffer::new(settings.buffer_capacity),
            history: Vec::new(),
            selector: RangeSelector::new(),
            generation: 0,
            is_loading: false,
            last_error: None,
            auto_refresh,
            live_session: 0,
            live_connected: false,
            connection: ConnectionStatus::Disconnected,
            analyzer: DeviationAnalyzer::from_settings(settings),
            trend: TrendWindow::with_lookback(settings.trend_lookback),
            ticks: TickPlanner::new(settings.tick_count),
        }
    }

    /// Session start: enter `mode` unconditionally and return the boundary work it needs.
    pub fn start(&mut self, mode: ViewMode) -> Vec<Effect> {
        self.enter(mode)
    }

    /// Switch view. Re-selecting the current mode only resets the zoom.
    pub fn change_mode(&mut self, mode: ViewMode) -> Vec<Effect> {
        if mode == self.mode {
            self.selector.reset();
            return Vec::new();
        }
        self.enter(mode)
    }

    fn enter(&mut self, mode: ViewMode) -> Vec<Effect> {
        #[cfg(debug_assertions)]
        if DF.log_view_changes {
            log::info!("VIEW: {} -> {}", self.mode, mode);
        }

        let mut effects = Vec::new();
        self.mode = mode;
        self.generation += 1;
        self.selector.reset();
        self.history.clear();
        self.last_error = None;

        if mode.is_live() {
            // Anything still in flight for a historical mode is superseded.
            self.is_loading = false;
            if self.auto_refresh {
                effects.push(self.connect_live());
            }
        } else {
            if self.live_connected {
                effects.push(self.disconnect_live());
            }
            self.is_loading = true;
            effects.push(Effect::FetchHistory(HistoryRequest {
                generation: self.generation,
                mode,
            }));
        }
        effects
    }

    fn connect_live(&mut self) -> Effect {
        self.live_session += 1;
        self.live_connected = true;
        self.connection = ConnectionStatus::Connecting;
        Effect::ConnectLive {
            session: self.live_session,
        }
    }

    fn disconnect_live(&mut self) -> Effect {
        self.live_session += 1;
        self.live_connected = false;
        self.connection = ConnectionStatus::Disconnected;
        Effect::DisconnectLive
    }

    /// Turning auto refresh off tears the live connection down; turning it back on in Live
    /// reconnects. The buffer is kept either way.
    pub fn set_auto_refresh(&mut self, enabled: bool) -> Vec<Effect> {
        if enabled == self.auto_refresh {
            return Vec::new();
        }
        self.auto_refresh = enabled;
        match (enabled, self.mode.is_live(), self.live_connected) {
            (true, true, false) => vec![self.connect_live()],
            (false, _, true) => vec![self.disconnect_live()],
            _ => Vec::new(),
        }
    }

    /// Apply a finished fetch. Returns false (and changes nothing) for a response issued
    /// before the latest mode change.
    pub fn apply_history(&mut self, response: HistoryResponse) -> bool {
        if response.generation != self.generation || response.mode != self.mode {
            #[cfg(debug_assertions)]
            if DF.log_history {
                log::info!(
                    "HISTORY: dropping stale {} response (gen {}, current gen {})",
                    response.mode,
                    response.generation,
                    self.generation
                );
            }
            return false;
        }

        self.is_loading = false;
        match response.result {
            Ok(points) => {
                #[cfg(debug_assertions)]
                if DF.log_history {
                    log::info!(
                        "HISTORY: {} -> {} points in {}ms",
                        response.mode,
                        points.len(),
                        response.duration_ms
                    );
                }
                self.history = points;
                self.last_error = None;
                self.selector.revalidate(self.history.len());
            }
            Err(e) => {
                log::error!("History fetch for {} failed: {}", response.mode, e);
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Apply one event from the live feed, in arrival order. Events from a torn-down
    /// connection are ignored. Returns true if a point was appended.
    pub fn apply_live_event(&mut self, event: LiveEvent) -> bool {
        if !self.live_connected || event.session() != self.live_session {
            return false;
        }
        match event {
            LiveEvent::Status { status, .. } => {
                self.connection = status;
                false
            }
            LiveEvent::Point { point, .. } => {
                self.append_live(point);
                true
            }
        }
    }

    pub fn append_live(&mut self, point: DataPoint) {
        self.buffer.append(point);
        if self.mode.is_live() {
            self.selector.revalidate(self.buffer.len());
        }
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        if self.mode.is_live() {
            self.selector.revalidate(0);
        }
    }

    // --- Drag selection ---

    pub fn begin_drag(&mut self, index: usize) {
        self.selector.begin_drag(index);
    }

    pub fn update_drag(&mut self, index: usize) {
        self.selector.update_drag(index);
    }

    pub fn commit_drag(&mut self) -> CommitOutcome {
        let len = self.displayed().len();
        self.selector.commit(len)
    }

    pub fn cancel_drag(&mut self) {
        self.selector.cancel();
    }

    pub fn reset_zoom(&mut self) {
        self.selector.reset();
    }

    // --- Read accessors for the presentation layer ---

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The series currently on screen: the live window in Live, the fetched window otherwise.
    pub fn displayed(&self) -> &[DataPoint] {
        if self.mode.is_live() {
            self.buffer.snapshot()
        } else {
            &self.history
        }
    }

    pub fn zoom(&self) -> ZoomRange {
        self.selector.zoom()
    }

    pub fn is_zoomed(&self) -> bool {
        self.selector.is_zoomed()
    }

    pub fn draft(&self) -> Option<SelectionDraft> {
        self.selector.draft()
    }

    /// Resolved `(first, last)` visible index, `None` when nothing is displayed.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.zoom().resolve(self.displayed().len())
    }

    pub fn ticks(&self) -> Vec<usize> {
        self.ticks.plan_range(&self.zoom(), self.displayed().len())
    }

    pub fn deviation(&self, index: usize, model: ModelKey) -> Option<DeviationRecord> {
        self.displayed()
            .get(index)
            .and_then(|p| self.analyzer.evaluate(p, model))
    }

    pub fn best_model(&self, index: usize) -> Option<ModelKey> {
        self.displayed()
            .get(index)
            .and_then(DeviationAnalyzer::best_model_at)
    }

    pub fn point_report(&self, index: usize) -> Option<PointReport> {
        summary::point_report(self.displayed(), index, &self.analyzer, &self.trend)
    }

    pub fn selection_summary(&self) -> Option<SelectionSummary> {
        let (left, right) = self.draft()?.span()?;
        summary::selection_summary(self.displayed(), left, right)
    }

    pub fn current_rps(&self) -> Option<f64> {
        summary::current_rps(self.displayed())
    }

    pub fn legend_best_model(&self) -> Option<ModelKey> {
        summary::legend_best_model(self.displayed())
    }

    pub fn analyzer(&self) -> &DeviationAnalyzer {
        &self.analyzer
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    /// Live view, feed enabled, but no open connection yet.
    pub fn is_awaiting_stream(&self) -> bool {
        self.mode.is_live() && self.connection != ConnectionStatus::Connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(i: usize) -> DataPoint {
        DataPoint::new(format!("10:00:{:02}", i % 60), Some(100.0 + i as f64), 100.0, 110.0)
    }

    fn fetch_request(effects: &[Effect]) -> HistoryRequest {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchHistory(req) => Some(*req),
                _ => None,
            })
            .expect("expected a history fetch")
    }

    fn respond(req: HistoryRequest, n: usize) -> HistoryResponse {
        HistoryResponse {
            generation: req.generation,
            mode: req.mode,
            duration_ms: 1,
            result: Ok((0..n).map(pt).collect()),
        }
    }

    fn live_session(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ConnectLive { session } => Some(*session),
                _ => None,
            })
            .expect("expected a live connect")
    }

    #[test]
    fn start_in_live_connects() {
        let mut vc = ViewController::default();
        let effects = vc.start(ViewMode::Live);
        assert_eq!(effects, vec![Effect::ConnectLive { session: 1 }]);
        assert!(vc.is_awaiting_stream());
    }

    #[test]
    fn live_points_flow_into_display() {
        let mut vc = ViewController::default();
        let session = live_session(&vc.start(ViewMode::Live));
        assert!(!vc.apply_live_event(LiveEvent::Status {
            session,
            status: ConnectionStatus::Connected,
        }));
        assert!(!vc.is_awaiting_stream());
        for i in 0..60 {
            assert!(vc.apply_live_event(LiveEvent::Point { session, point: pt(i) }));
        }
        assert_eq!(vc.displayed().len(), 50);
        assert_eq!(vc.visible_range(), Some((0, 49)));
    }

    #[test]
    fn leaving_live_disconnects_and_fetches() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let effects = vc.change_mode(ViewMode::OneHour);
        assert_eq!(effects[0], Effect::DisconnectLive);
        let req = fetch_request(&effects);
        assert_eq!(req.mode, ViewMode::OneHour);
        assert!(vc.is_loading());
        assert!(vc.displayed().is_empty());
    }

    #[test]
    fn stale_history_response_is_discarded() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let first = fetch_request(&vc.change_mode(ViewMode::OneHour));
        let second = fetch_request(&vc.change_mode(ViewMode::TwentyFourHours));

        assert!(!vc.apply_history(respond(first, 10)));
        assert!(vc.displayed().is_empty());
        assert!(vc.is_loading());

        assert!(vc.apply_history(respond(second, 7)));
        assert_eq!(vc.displayed().len(), 7);
        assert!(!vc.is_loading());
    }

    #[test]
    fn same_mode_response_from_earlier_visit_is_discarded() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let old = fetch_request(&vc.change_mode(ViewMode::SixHours));
        vc.change_mode(ViewMode::Live);
        let new = fetch_request(&vc.change_mode(ViewMode::SixHours));
        assert_eq!(old.mode, new.mode);
        assert!(!vc.apply_history(respond(old, 30)));
        assert!(vc.apply_history(respond(new, 5)));
        assert_eq!(vc.displayed().len(), 5);
    }

    #[test]
    fn response_arriving_after_return_to_live_is_ignored() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let req = fetch_request(&vc.change_mode(ViewMode::OneHour));
        let effects = vc.change_mode(ViewMode::Live);
        assert!(matches!(effects[0], Effect::ConnectLive { .. }));
        assert!(!vc.is_loading());
        assert!(!vc.apply_history(respond(req, 10)));
        assert!(vc.displayed().is_empty());
    }

    #[test]
    fn failed_fetch_reports_error_and_stops_loading() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let req = fetch_request(&vc.change_mode(ViewMode::OneHour));
        let applied = vc.apply_history(HistoryResponse {
            generation: req.generation,
            mode: req.mode,
            duration_ms: 3,
            result: Err("503 Service Unavailable".into()),
        });
        assert!(applied);
        assert!(!vc.is_loading());
        assert_eq!(vc.last_error(), Some("503 Service Unavailable"));
        assert!(vc.displayed().is_empty());
    }

    #[test]
    fn buffer_survives_historical_detour() {
        let mut vc = ViewController::default();
        let session = live_session(&vc.start(ViewMode::Live));
        for i in 0..5 {
            vc.apply_live_event(LiveEvent::Point { session, point: pt(i) });
        }
        vc.change_mode(ViewMode::SixHours);
        // Late point from the torn-down connection.
        assert!(!vc.apply_live_event(LiveEvent::Point { session, point: pt(99) }));

        let effects = vc.change_mode(ViewMode::Live);
        let new_session = live_session(&effects);
        assert_ne!(new_session, session);
        assert_eq!(vc.displayed().len(), 5);
    }

    #[test]
    fn mode_change_resets_zoom() {
        let mut vc = ViewController::default();
        let session = live_session(&vc.start(ViewMode::Live));
        for i in 0..20 {
            vc.apply_live_event(LiveEvent::Point { session, point: pt(i) });
        }
        vc.begin_drag(12);
        vc.update_drag(4);
        assert_eq!(vc.commit_drag(), CommitOutcome::Zoomed(ZoomRange::between(4, 12)));
        assert_eq!(vc.ticks(), vec![4, 6, 8, 10, 12]);

        vc.change_mode(ViewMode::OneHour);
        assert!(!vc.is_zoomed());
    }

    #[test]
    fn cancelled_drag_keeps_committed_zoom() {
        let mut vc = ViewController::default();
        let session = live_session(&vc.start(ViewMode::Live));
        for i in 0..20 {
            vc.apply_live_event(LiveEvent::Point { session, point: pt(i) });
        }
        vc.begin_drag(2);
        vc.update_drag(10);
        vc.commit_drag();

        vc.begin_drag(5);
        vc.update_drag(7);
        assert!(vc.draft().is_some());
        vc.cancel_drag();
        assert!(vc.draft().is_none());
        assert_eq!(vc.commit_drag(), CommitOutcome::Ignored);
        assert_eq!(vc.zoom(), ZoomRange::between(2, 10));
    }

    #[test]
    fn reselecting_mode_only_resets_zoom() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        let req = fetch_request(&vc.change_mode(ViewMode::OneHour));
        vc.apply_history(respond(req, 30));
        vc.begin_drag(3);
        vc.update_drag(9);
        vc.commit_drag();
        assert!(vc.change_mode(ViewMode::OneHour).is_empty());
        assert!(!vc.is_zoomed());
        assert_eq!(vc.displayed().len(), 30);
    }

    #[test]
    fn clearing_buffer_resets_zoom_in_live() {
        let mut vc = ViewController::default();
        let session = live_session(&vc.start(ViewMode::Live));
        for i in 0..20 {
            vc.apply_live_event(LiveEvent::Point { session, point: pt(i) });
        }
        vc.begin_drag(2);
        vc.update_drag(8);
        vc.commit_drag();
        vc.clear_buffer();
        assert!(!vc.is_zoomed());
        assert!(vc.displayed().is_empty());
        assert!(vc.ticks().is_empty());
    }

    #[test]
    fn auto_refresh_toggles_connection() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        assert_eq!(vc.set_auto_refresh(false), vec![Effect::DisconnectLive]);
        assert!(vc.set_auto_refresh(false).is_empty());
        assert!(matches!(vc.set_auto_refresh(true)[..], [Effect::ConnectLive { .. }]));
    }

    #[test]
    fn auto_refresh_off_in_history_reconnects_only_on_live() {
        let mut vc = ViewController::new(&MonitorSettings::default(), false);
        assert!(matches!(vc.start(ViewMode::Live)[..], []));
        vc.change_mode(ViewMode::OneHour);
        assert!(vc.set_auto_refresh(true).is_empty());
        assert!(matches!(vc.change_mode(ViewMode::Live)[..], [Effect::ConnectLive { .. }]));
    }

    #[test]
    fn accessors_annotate_points() {
        let mut vc = ViewController::default();
        vc.start(ViewMode::Live);
        vc.append_live(DataPoint::new("10:00:00", Some(100.0), 80.0, 90.0));
        assert_eq!(vc.best_model(0), Some(ModelKey::Model2));
        assert!(vc.deviation(0, ModelKey::Model1).unwrap().is_error);
        assert!(vc.deviation(3, ModelKey::Model1).is_none());
        assert_eq!(vc.current_rps(), Some(100.0));
        assert_eq!(vc.legend_best_model(), Some(ModelKey::Model2));
        assert!(vc.point_report(0).is_some());
    }
}
