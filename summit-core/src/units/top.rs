//! Top unit: stop button, display, and link health
//!
//! Message handling and polling both run on the unit loop. Inbound radio
//! datagrams are decoded by the receive task and handed over through a
//! queue, so `handle_message` never races `poll`.

use summit_protocol::{LinkMessage, MessageKind};

use super::{queue, Outbox, UnitError};
use crate::config::TimingConfig;
use crate::display::{PanelFrame, Readout};
use crate::input::{Debouncer, Edge};
use crate::link::{LinkChange, LinkHealth};
use crate::stopwatch::{Event, State, StopwatchSession};
use crate::traits::{Color, Indicator, MatrixDisplay};

/// What a single top-unit step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TopReport {
    /// Session state after the step
    pub state: State,
    /// Link change detected during the step
    pub link: Option<LinkChange>,
    /// Session event that changed the state
    pub applied: Option<Event>,
}

/// Top unit controller
pub struct TopUnit {
    timing: TimingConfig,
    session: StopwatchSession,
    link: LinkHealth,
    stop: Debouncer,
    /// When the OK banner went up
    banner_since_ms: Option<u32>,
    last_refresh_ms: Option<u32>,
    outbox: Outbox,
}

impl TopUnit {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            session: StopwatchSession::new(),
            link: LinkHealth::new(timing.heartbeat_interval_ms, timing.link_timeout_ms),
            stop: Debouncer::new(timing.debounce_ms),
            banner_since_ms: None,
            last_refresh_ms: None,
            outbox: Outbox::new(),
        }
    }

    /// Show PAIR and queue the first heartbeat
    pub fn begin<D: MatrixDisplay>(
        &mut self,
        now_ms: u32,
        display: &mut D,
    ) -> Result<(), UnitError> {
        self.send_heartbeat(now_ms)?;
        display.show(&PanelFrame::pair())?;
        Ok(())
    }

    /// Process one inbound message
    pub fn handle_message<D, I>(
        &mut self,
        message: &LinkMessage,
        now_ms: u32,
        display: &mut D,
        indicator: &mut I,
    ) -> Result<TopReport, UnitError>
    where
        D: MatrixDisplay,
        I: Indicator,
    {
        let link = self.link.message_received(now_ms);
        let mut applied = None;

        let event = match message.kind {
            MessageKind::Start => Some(Event::StartReceived { at_ms: now_ms }),
            MessageKind::Reset => Some(Event::ResetReceived),
            MessageKind::Ping => {
                queue(&mut self.outbox, LinkMessage::pong(now_ms))?;
                None
            }
            MessageKind::Pong => None,
        };

        if let Some(event) = event {
            if self.session.apply(event) {
                applied = Some(event);
            }
        }

        match event {
            Some(Event::StartReceived { .. }) if applied.is_some() => {
                self.banner_since_ms = None;
                self.last_refresh_ms = None;
                self.refresh(now_ms, display)?;
            }
            // RESET always clears, even when already waiting
            Some(Event::ResetReceived) => {
                self.banner_since_ms = None;
                let cleared = display.clear();
                let off = indicator.off();
                cleared?;
                off?;
            }
            _ => {}
        }

        if link == Some(LinkChange::Connected) && self.session.state().is_waiting() {
            self.banner_since_ms = Some(now_ms);
            display.show(&PanelFrame::ok())?;
        }

        Ok(self.report(link, applied))
    }

    /// Periodic step: heartbeat, timeout, stop button, banner, and repaint
    pub fn poll<D, I>(
        &mut self,
        now_ms: u32,
        stop_pressed: bool,
        display: &mut D,
        indicator: &mut I,
    ) -> Result<TopReport, UnitError>
    where
        D: MatrixDisplay,
        I: Indicator,
    {
        if self.link.heartbeat_due(now_ms) {
            self.send_heartbeat(now_ms)?;
        }

        let link = self.link.check_timeout(now_ms);
        let mut applied = None;

        if self.stop.update(stop_pressed, now_ms) == Some(Edge::Pressed) {
            let event = Event::StopPressed { at_ms: now_ms };
            if self.session.apply(event) {
                applied = Some(event);
            }
        }

        if link == Some(LinkChange::Lost) && self.session.state().is_waiting() {
            self.banner_since_ms = None;
            display.show(&PanelFrame::pair())?;
        }

        if applied.is_some() {
            // Both outputs are attempted; the first failure is reported
            let shown = match self.session.final_elapsed() {
                Some(elapsed_ms) => display.show(&Readout::from_millis(elapsed_ms).to_frame()),
                None => Ok(()),
            };
            let lit = indicator.set_color(Color::GREEN);
            shown?;
            lit?;
        }

        if let Some(since) = self.banner_since_ms {
            if now_ms.wrapping_sub(since) >= self.timing.banner_ms {
                self.banner_since_ms = None;
                display.clear()?;
            }
        }

        if self.session.state().is_running() && self.refresh_due(now_ms) {
            self.refresh(now_ms, display)?;
        }

        Ok(self.report(link, applied))
    }

    /// Take every queued outbound message
    pub fn take_outbox(&mut self) -> Outbox {
        core::mem::take(&mut self.outbox)
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// Check if the OK banner is currently up
    pub fn showing_banner(&self) -> bool {
        self.banner_since_ms.is_some()
    }

    fn send_heartbeat(&mut self, now_ms: u32) -> Result<(), UnitError> {
        self.link.heartbeat_sent(now_ms);
        queue(&mut self.outbox, LinkMessage::ping(now_ms))
    }

    fn refresh_due(&self, now_ms: u32) -> bool {
        match self.last_refresh_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.timing.refresh_interval_ms,
        }
    }

    fn refresh<D: MatrixDisplay>(&mut self, now_ms: u32, display: &mut D) -> Result<(), UnitError> {
        self.last_refresh_ms = Some(now_ms);
        if let Some(elapsed_ms) = self.session.elapsed_at(now_ms) {
            display.show(&Readout::from_millis(elapsed_ms).to_frame())?;
        }
        Ok(())
    }

    fn report(&self, link: Option<LinkChange>, applied: Option<Event>) -> TopReport {
        TopReport {
            state: self.session.state(),
            link,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::mock::{MockDisplay, MockIndicator};

    struct Rig {
        unit: TopUnit,
        display: MockDisplay,
        indicator: MockIndicator,
        sent: heapless::Vec<LinkMessage, 64>,
    }

    impl Rig {
        fn new() -> Self {
            let mut rig = Self {
                unit: TopUnit::new(TimingConfig::default()),
                display: MockDisplay::default(),
                indicator: MockIndicator::default(),
                sent: heapless::Vec::new(),
            };
            rig.unit.begin(0, &mut rig.display).unwrap();
            rig.drain();
            rig
        }

        fn drain(&mut self) {
            for message in self.unit.take_outbox() {
                self.sent.push(message).unwrap();
            }
        }

        fn recv(&mut self, message: LinkMessage, now_ms: u32) -> TopReport {
            let report = self
                .unit
                .handle_message(&message, now_ms, &mut self.display, &mut self.indicator)
                .unwrap();
            self.drain();
            report
        }

        fn poll(&mut self, now_ms: u32, pressed: bool) -> TopReport {
            let report = self
                .unit
                .poll(now_ms, pressed, &mut self.display, &mut self.indicator)
                .unwrap();
            self.drain();
            report
        }

        /// Hold the stop button long enough to pass the debounce window
        fn press_stop(&mut self, at_ms: u32) -> TopReport {
            self.poll(at_ms, true);
            self.poll(at_ms + 10, true)
        }
    }

    #[test]
    fn test_begin_shows_pair_and_pings() {
        let mut rig = Rig::new();
        assert_eq!(rig.display.last(), Some(&PanelFrame::pair()));
        assert_eq!(rig.sent.as_slice(), &[LinkMessage::ping(0)]);
        assert!(rig.unit.take_outbox().is_empty());
    }

    #[test]
    fn test_heartbeat_every_interval() {
        let mut rig = Rig::new();
        rig.sent.clear();

        rig.poll(500, false);
        assert!(rig.sent.is_empty());

        rig.poll(1000, false);
        assert_eq!(rig.sent.as_slice(), &[LinkMessage::ping(1000)]);
    }

    #[test]
    fn test_connect_shows_ok_then_clears() {
        let mut rig = Rig::new();
        let report = rig.recv(LinkMessage::pong(100), 100);
        assert_eq!(report.link, Some(LinkChange::Connected));
        assert_eq!(rig.display.last(), Some(&PanelFrame::ok()));
        assert!(rig.unit.showing_banner());

        rig.poll(2000, false);
        assert!(rig.unit.showing_banner());

        rig.poll(2100, false);
        assert!(!rig.unit.showing_banner());
        assert_eq!(rig.display.last(), Some(&PanelFrame::BLANK));
    }

    #[test]
    fn test_ping_answered_with_pong() {
        let mut rig = Rig::new();
        rig.sent.clear();
        rig.recv(LinkMessage::ping(7), 50);
        assert_eq!(rig.sent.as_slice(), &[LinkMessage::pong(50)]);
    }

    #[test]
    fn test_full_climb() {
        let mut rig = Rig::new();

        let report = rig.recv(LinkMessage::start(0), 1_000);
        assert_eq!(report.state, State::Running { started_at_ms: 1_000 });
        assert_eq!(report.applied, Some(Event::StartReceived { at_ms: 1_000 }));
        // Start cancels the OK banner and paints 0.00 straight away
        assert!(!rig.unit.showing_banner());
        assert_eq!(rig.display.last(), Some(&Readout::ZERO.to_frame()));

        rig.recv(LinkMessage::ping(0), 5_000);
        rig.poll(5_000, false);
        assert_eq!(
            rig.display.last(),
            Some(&Readout::from_millis(4_000).to_frame())
        );

        rig.poll(13_335, true);
        let report = rig.poll(13_345, true);
        assert_eq!(report.state, State::Stopped { elapsed_ms: 12_345 });
        assert_eq!(rig.indicator.last(), Some(Color::GREEN));
        assert_eq!(
            rig.display.last(),
            Some(&Readout::from_millis(12_345).to_frame())
        );

        // The link dropped during the climb, so RESET also reconnects
        let report = rig.recv(LinkMessage::reset(0), 20_000);
        assert_eq!(report.state, State::Waiting);
        assert_eq!(report.link, Some(LinkChange::Connected));
        assert_eq!(rig.indicator.last(), Some(Color::OFF));
        assert_eq!(rig.display.last(), Some(&PanelFrame::ok()));

        rig.poll(22_000, false);
        assert_eq!(rig.display.last(), Some(&PanelFrame::BLANK));
    }

    #[test]
    fn test_reset_while_connected_clears() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::pong(0), 0);
        rig.recv(LinkMessage::start(0), 100);
        let report = rig.recv(LinkMessage::reset(0), 600);
        assert_eq!(report.link, None);
        assert_eq!(report.applied, Some(Event::ResetReceived));
        assert_eq!(rig.display.last(), Some(&PanelFrame::BLANK));
    }

    #[test]
    fn test_stop_ignored_while_waiting() {
        let mut rig = Rig::new();
        let report = rig.press_stop(100);
        assert_eq!(report.state, State::Waiting);
        assert_eq!(report.applied, None);
        assert!(rig.indicator.colors.is_empty());
    }

    #[test]
    fn test_final_time_frozen() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::start(0), 0);
        rig.press_stop(3_000);
        let frozen = *rig.display.last().unwrap();

        // Keep the link alive and let time pass
        for t in (4_000..10_000).step_by(500) {
            rig.recv(LinkMessage::pong(0), t);
            rig.poll(t, false);
        }
        assert_eq!(rig.display.last(), Some(&frozen));
        assert_eq!(rig.unit.state(), State::Stopped { elapsed_ms: 3_010 });
    }

    #[test]
    fn test_start_during_run_ignored() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::start(0), 100);
        let report = rig.recv(LinkMessage::start(0), 900);
        assert_eq!(report.state, State::Running { started_at_ms: 100 });
        assert_eq!(report.applied, None);
    }

    #[test]
    fn test_link_lost_while_waiting_shows_pair() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::pong(0), 0);
        rig.poll(2_500, false);
        assert_eq!(rig.display.last(), Some(&PanelFrame::BLANK));

        let report = rig.poll(3_001, false);
        assert_eq!(report.link, Some(LinkChange::Lost));
        assert!(!rig.unit.is_connected());
        assert_eq!(rig.display.last(), Some(&PanelFrame::pair()));
    }

    #[test]
    fn test_link_lost_while_running_keeps_clock() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::start(0), 0);
        let report = rig.poll(3_001, false);
        assert_eq!(report.link, Some(LinkChange::Lost));
        assert_eq!(
            rig.display.last(),
            Some(&Readout::from_millis(3_001).to_frame())
        );
    }

    #[test]
    fn test_link_lost_while_stopped_keeps_final_time() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::start(0), 0);
        rig.press_stop(1_000);

        let report = rig.poll(3_001, false);
        assert_eq!(report.link, Some(LinkChange::Lost));
        assert_eq!(report.state, State::Stopped { elapsed_ms: 1_010 });
        assert_eq!(
            rig.display.last(),
            Some(&Readout::from_millis(1_010).to_frame())
        );
        assert_eq!(rig.indicator.last(), Some(Color::GREEN));
    }

    #[test]
    fn test_display_failure_still_drives_indicator() {
        let mut rig = Rig::new();
        rig.recv(LinkMessage::start(0), 0);
        rig.display.fail = true;

        let _ = rig.unit.poll(1_000, true, &mut rig.display, &mut rig.indicator);
        let result = rig.unit.poll(1_010, true, &mut rig.display, &mut rig.indicator);
        assert!(matches!(result, Err(UnitError::Display(_))));
        assert_eq!(rig.unit.state(), State::Stopped { elapsed_ms: 1_010 });
        assert_eq!(rig.indicator.last(), Some(Color::GREEN));

        let result = rig.unit.handle_message(
            &LinkMessage::reset(0),
            1_500,
            &mut rig.display,
            &mut rig.indicator,
        );
        assert!(matches!(result, Err(UnitError::Display(_))));
        assert_eq!(rig.unit.state(), State::Waiting);
        assert_eq!(rig.indicator.last(), Some(Color::OFF));
    }

    #[test]
    fn test_display_failure_still_applies_state() {
        let mut rig = Rig::new();
        rig.display.fail = true;
        let result = rig.unit.handle_message(
            &LinkMessage::start(0),
            500,
            &mut rig.display,
            &mut rig.indicator,
        );
        assert!(matches!(result, Err(UnitError::Display(_))));
        assert!(rig.unit.state().is_running());
    }
}
