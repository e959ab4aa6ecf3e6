//! Terminal gate host.
//!
//! The terminal has no input widget that can be rewritten in place, so the
//! host keeps the "field" itself: the last line typed, replaced by a notice
//! while one is shown. Notices and control changes are written as lines.

use std::{cell::RefCell, io::Write, rc::Rc};

use tokio::sync::mpsc::UnboundedSender;
use wordgate_core::{ConfettiPlan, ControlState, GateHost, LogLevel};

/// Gate host writing to a terminal.
///
/// Clones share the field, the control and the writer. A released form is
/// sent as the raw field value on `released`.
#[derive(Debug)]
pub struct TerminalHost<W: Write> {
    out: Rc<RefCell<W>>,
    field: Rc<RefCell<String>>,
    control: Rc<RefCell<ControlState>>,
    released: UnboundedSender<String>,
}

impl<W: Write> Clone for TerminalHost<W> {
    fn clone(&self) -> Self {
        Self {
            out: Rc::clone(&self.out),
            field: Rc::clone(&self.field),
            control: Rc::clone(&self.control),
            released: self.released.clone(),
        }
    }
}

impl<W: Write> TerminalHost<W> {
    /// Host writing to `out` with an enabled control labelled `idle_label`.
    pub fn new(out: W, idle_label: &str, released: UnboundedSender<String>) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
            field: Rc::new(RefCell::new(String::new())),
            control: Rc::new(RefCell::new(ControlState {
                enabled: true,
                label: idle_label.to_string(),
            })),
            released,
        }
    }

    /// Replace the field with a typed line.
    pub fn type_input(&self, line: &str) {
        line.clone_into(&mut self.field.borrow_mut());
    }

    /// Current field content.
    pub fn field(&self) -> String {
        self.field.borrow().clone()
    }

    /// Current control state.
    pub fn control(&self) -> ControlState {
        self.control.borrow().clone()
    }

    /// Write one line.
    pub fn line(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::warn!("terminal write failed: {}", e);
        }
    }

    /// Print the input prompt with the control's label.
    pub fn prompt(&self) {
        let label = self.control.borrow().label.clone();
        self.line(&format!("[{label}] >"));
    }

    /// Draw a celebration `width` columns wide.
    pub fn celebrate(&self, plan: &ConfettiPlan, glyph: &str, width: usize) {
        for row in confetti_rows(plan, glyph, width) {
            self.line(&row);
        }
    }
}

/// Lay particles out on rows: position from `left_vw`, row from how fast
/// each one falls.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn confetti_rows(plan: &ConfettiPlan, glyph: &str, width: usize) -> Vec<String> {
    const ROWS: usize = 5;

    let width = width.max(1);
    let mut grid = vec![vec![false; width]; ROWS];
    let (slowest, fastest) = plan.particles.iter().fold((f64::MIN, f64::MAX), |(hi, lo), p| {
        (hi.max(p.duration_ms), lo.min(p.duration_ms))
    });
    let spread = (slowest - fastest).max(1.0);

    for particle in &plan.particles {
        let column = ((particle.left_vw / 100.0) * width as f64) as usize;
        let row = (((particle.duration_ms - fastest) / spread) * (ROWS - 1) as f64) as usize;
        grid[row.min(ROWS - 1)][column.min(width - 1)] = true;
    }

    grid.into_iter()
        .map(|cells| {
            cells.into_iter().map(|lit| if lit { glyph } else { " " }).collect::<String>()
        })
        .map(|row| row.trim_end().to_string())
        .collect()
}

impl<W: Write> GateHost for TerminalHost<W> {
    fn show_notice(&self, text: &str, color: &str) {
        text.clone_into(&mut self.field.borrow_mut());
        self.line(&format!("({color}) {text}"));
    }

    fn clear_notice(&self) {
        self.field.borrow_mut().clear();
    }

    fn focus_input(&self) {
        self.prompt();
    }

    fn set_control(&self, state: ControlState) {
        if !state.enabled {
            self.line(&state.label);
        }
        *self.control.borrow_mut() = state;
    }

    fn submit_native(&self) {
        let value = self.field();
        if self.released.send(value).is_err() {
            tracing::warn!("session closed before the form was released");
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use wordgate_core::Particle;

    use super::*;

    fn host() -> (TerminalHost<Vec<u8>>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TerminalHost::new(Vec::new(), "發送", tx), rx)
    }

    fn output(host: &TerminalHost<Vec<u8>>) -> String {
        String::from_utf8(host.out.borrow().clone()).unwrap()
    }

    #[test]
    fn notice_replaces_field_and_is_printed() {
        let (host, _rx) = host();
        host.type_input("zz");

        host.show_notice("請輸入 5 個字母！", "orange");
        assert_eq!(host.field(), "請輸入 5 個字母！");
        assert!(output(&host).contains("(orange) 請輸入 5 個字母！"));

        host.clear_notice();
        assert_eq!(host.field(), "");
    }

    #[test]
    fn release_sends_raw_field() {
        let (host, mut rx) = host();
        host.type_input("  hello ");
        host.submit_native();
        assert_eq!(rx.try_recv().unwrap(), "  hello ");
    }

    #[test]
    fn locked_label_is_printed_and_tracked() {
        let (host, _rx) = host();
        host.set_control(ControlState { enabled: false, label: "驗證中...".to_string() });

        assert!(!host.control().enabled);
        assert!(output(&host).contains("驗證中..."));

        host.set_control(ControlState { enabled: true, label: "發送".to_string() });
        host.prompt();
        assert!(output(&host).ends_with("[發送] >\n"));
    }

    #[test]
    fn confetti_rows_place_every_particle() {
        let plan = ConfettiPlan {
            particles: vec![
                Particle { left_vw: 0.0, font_size_px: 10.0, duration_ms: 2000.0, end_rotation_deg: 0.0 },
                Particle { left_vw: 99.9, font_size_px: 10.0, duration_ms: 5000.0, end_rotation_deg: 0.0 },
            ],
        };

        let rows = confetti_rows(&plan, "*", 10);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "*");
        assert_eq!(rows[4], "         *");
    }

    #[test]
    fn empty_plan_draws_blank_rows() {
        let rows = confetti_rows(&ConfettiPlan { particles: Vec::new() }, "*", 10);
        assert!(rows.iter().all(String::is_empty));
    }
}
