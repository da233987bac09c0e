//! Per-device report processing.
//!
//! A [`Session`] owns everything that lives as long as one connected pad: the
//! field layout and the mirror cache. Each report goes through patch, decode
//! and routing, and the resulting events leave as a single batch.

use crate::decoder::ReportLayout;
use crate::error::Vader3Result;
use crate::event::{EventKind, FieldEvent, NormalizedEvent};
use crate::hat::{HatFault, decode_hat};
use crate::logger::{Verbosity, log, log_data, log_detail};
use crate::patch::patch_report;
use crate::protocol::{HAT_COMBINED, MAX_REPORT_LEN};
use crate::remap::{MirrorCache, remap_button};
use evdev::InputEvent;
use evdev::uinput::VirtualDevice;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Destination of normalized batches. One call per report.
pub trait EventSink {
    fn emit(&mut self, events: &[NormalizedEvent]) -> std::io::Result<()>;
}

impl EventSink for VirtualDevice {
    // VirtualDevice::emit terminates the batch with SYN_REPORT, so both hat
    // axes and all buttons of a report become visible at once.
    fn emit(&mut self, events: &[NormalizedEvent]) -> std::io::Result<()> {
        let batch: Vec<InputEvent> = events.iter().copied().map(InputEvent::from).collect();
        VirtualDevice::emit(self, &batch)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub events: Vec<NormalizedEvent>,
    pub faults: Vec<HatFault>,
}

#[derive(Debug, Clone)]
pub struct Session {
    layout: ReportLayout,
    cache: MirrorCache,
    reports: u64,
}

impl Session {
    pub fn new(layout: ReportLayout) -> Self {
        Self {
            layout,
            cache: MirrorCache::new(),
            reports: 0,
        }
    }

    pub fn cache(&self) -> &MirrorCache {
        &self.cache
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Routes one decoded field, appending its output to `events`.
    pub fn route(
        &mut self,
        field: FieldEvent,
        events: &mut Vec<NormalizedEvent>,
    ) -> Result<(), HatFault> {
        match field.kind {
            EventKind::Absolute if field.code == HAT_COMBINED => {
                events.extend(decode_hat(field.value)?);
            }
            EventKind::Absolute => {
                events.push(NormalizedEvent::absolute(field.code, field.value));
            }
            EventKind::Button => {
                events.extend(remap_button(&mut self.cache, field));
            }
        }
        Ok(())
    }

    /// Patches `data` in place, decodes it and routes every field.
    ///
    /// A bad hat value only drops the hat axes; the rest of the report is
    /// still processed.
    pub fn process_report(&mut self, data: &mut [u8]) -> ReportOutcome {
        self.reports += 1;
        patch_report(data);

        let mut outcome = ReportOutcome::default();
        for field in self.layout.decode(data) {
            if let Err(fault) = self.route(field, &mut outcome.events) {
                log(Verbosity::Low, &fault.to_string());
                outcome.faults.push(fault);
            }
        }
        outcome
    }

    /// Reads reports until the device goes away (EOF), forwarding every
    /// non-empty batch to `sink`.
    pub async fn run<R, S>(&mut self, reader: &mut R, sink: &mut S) -> Vader3Result<()>
    where
        R: AsyncRead + Unpin,
        S: EventSink,
    {
        let mut buf = [0u8; MAX_REPORT_LEN];

        loop {
            let len = reader.read(&mut buf).await?;
            if len == 0 {
                let detail = format!("reports={}", self.reports);
                log_detail(Verbosity::Low, "Dispositivo desconectado", &detail);
                return Ok(());
            }

            log_data(Verbosity::High, "HID report", &buf[..len]);
            let outcome = self.process_report(&mut buf[..len]);
            log(
                Verbosity::Medium,
                &format!("Report #{}: {} eventos", self.reports, outcome.events.len()),
            );

            if !outcome.events.is_empty() {
                sink.emit(&outcome.events)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{SRC_BACK_MIDDLE_LEFT, SRC_FACE_C, paddle};
    use evdev::{AbsoluteAxisType, Key};

    fn session() -> Session {
        Session::new(ReportLayout::vader3().unwrap())
    }

    #[test]
    fn test_route_axis_pass_through() {
        let mut s = session();
        let mut events = Vec::new();
        let stick = FieldEvent::absolute(AbsoluteAxisType::ABS_RZ.0, -40);
        assert_eq!(s.route(stick, &mut events), Ok(()));
        assert_eq!(events, vec![NormalizedEvent::absolute(AbsoluteAxisType::ABS_RZ.0, -40)]);
    }

    #[test]
    fn test_route_hat_fault() {
        let mut s = session();
        let mut events = Vec::new();
        assert_eq!(
            s.route(FieldEvent::absolute(HAT_COMBINED, 9), &mut events),
            Err(HatFault { value: 9 })
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_route_unknown_button() {
        let mut s = session();
        let mut events = Vec::new();
        let volume = FieldEvent::button(Key::KEY_VOLUMEUP.0, 1);
        assert_eq!(s.route(volume, &mut events), Ok(()));
        assert!(events.is_empty());
    }

    #[test]
    fn test_route_mirror_pair() {
        let mut s = session();
        let mut events = Vec::new();
        assert_eq!(s.route(FieldEvent::button(SRC_FACE_C, 1), &mut events), Ok(()));
        assert!(events.is_empty());
        let canonical = FieldEvent::button(SRC_BACK_MIDDLE_LEFT, 0);
        assert_eq!(s.route(canonical, &mut events), Ok(()));
        assert_eq!(events, vec![NormalizedEvent::button(paddle(3), 1)]);
        assert_eq!(*s.cache(), MirrorCache::new());
    }

    #[test]
    fn test_sessions_do_not_share_cache() {
        let mut a = session();
        let mut b = session();
        let mut events = Vec::new();
        assert_eq!(a.route(FieldEvent::button(SRC_FACE_C, 1), &mut events), Ok(()));
        let canonical = FieldEvent::button(SRC_BACK_MIDDLE_LEFT, 0);
        assert_eq!(b.route(canonical, &mut events), Ok(()));
        assert_eq!(events, vec![NormalizedEvent::button(paddle(3), 0)]);
        assert_ne!(*a.cache(), MirrorCache::new());
    }

    #[test]
    fn test_process_report_bad_hat_keeps_buttons() {
        let mut s = session();
        let mut data = [0u8; 12];
        data[5] = 0x0C;
        data[8] = 0x01;
        let outcome = s.process_report(&mut data);
        assert_eq!(outcome.faults, vec![HatFault { value: 12 }]);
        let south = NormalizedEvent::button(Key::BTN_SOUTH.0, 1);
        let hat_y = AbsoluteAxisType::ABS_HAT0Y.0;
        assert!(outcome.events.contains(&south));
        assert!(outcome.events.iter().all(|e| e.code != hat_y));
        assert_eq!(s.reports(), 1);
    }
}
