//! Keyboard driven range controls, one per transform parameter
use uuid::Uuid;
use wirebox_core::{Param, TransformParams};

use crate::publisher::Publisher;

/// Change notification sent by a [`RangeControl`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub param: Param,
    pub value: f64,
}

/// Increment used when nudging a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fine,
    Normal,
    Coarse,
}

impl Step {
    pub fn size(self, param: Param) -> f64 {
        match (self, param.is_rotation()) {
            (Step::Fine, true) => 1.0,
            (Step::Fine, false) => 0.05,
            (Step::Normal, true) => 5.0,
            (Step::Normal, false) => 0.25,
            (Step::Coarse, true) => 45.0,
            (Step::Coarse, false) => 1.0,
        }
    }
}

const KNOB: char = '●';
const TRACK: char = '─';
const LABEL_WIDTH: usize = 12;
// "> " + label + " [" + "] " + value
const ROW_CHROME: usize = 2 + LABEL_WIDTH + 2 + 2 + 7;

/// A slider over one parameter's domain that notifies listeners when its value changes
pub struct RangeControl {
    param: Param,
    initial: f64,
    value: f64,
    changed: Publisher<ParamChange>,
}

impl RangeControl {
    pub fn new(param: Param, initial: f64) -> Self {
        let (min, max) = param.range();
        let initial = initial.clamp(min, max);
        Self {
            param,
            initial,
            value: initial,
            changed: Publisher::new(),
        }
    }

    pub fn param(&self) -> Param {
        self.param
    }

    pub fn label(&self) -> &'static str {
        self.param.label()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn on_changed<F>(&mut self, listener: F) -> Uuid
    where
        F: Fn(ParamChange) + 'static,
    {
        self.changed.register(listener)
    }

    /// Clamp `value` into the domain and store it.
    ///
    /// Listeners are notified only when the stored value actually changes;
    /// returns whether it did.
    pub fn set_value(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let (min, max) = self.param.range();
        let value = value.clamp(min, max);
        if value == self.value {
            return false;
        }
        self.value = value;
        log::trace!("{} -> {}", self.param.key(), value);
        self.changed.notify(ParamChange {
            param: self.param,
            value,
        });
        true
    }

    /// Move by one step; `direction` is +1.0 or -1.0
    pub fn step(&mut self, direction: f64, step: Step) -> bool {
        let next = self.value + direction * step.size(self.param);
        // keep repeated decimal steps from accumulating float noise
        self.set_value((next * 1e6).round() / 1e6)
    }

    pub fn to_min(&mut self) -> bool {
        self.set_value(self.param.range().0)
    }

    pub fn to_max(&mut self) -> bool {
        self.set_value(self.param.range().1)
    }

    pub fn reset(&mut self) -> bool {
        self.set_value(self.initial)
    }

    /// Position of the value inside the domain, 0.0 at min and 1.0 at max
    pub fn fraction(&self) -> f64 {
        let (min, max) = self.param.range();
        (self.value - min) / (max - min)
    }

    /// Track of `width` cells with the knob at the current value
    pub fn track(&self, width: usize) -> String {
        if width == 0 {
            return String::new();
        }
        let knob = (self.fraction() * (width - 1) as f64).round() as usize;
        (0..width)
            .map(|i| if i == knob { KNOB } else { TRACK })
            .collect()
    }

    /// One full row: selection marker, label, track and value
    pub fn render(&self, width: usize, selected: bool) -> String {
        let track = self.track(width.saturating_sub(ROW_CHROME).max(3));
        format!(
            "{} {:<label$} [{}] {:>7.2}",
            if selected { '>' } else { ' ' },
            self.label(),
            track,
            self.value,
            label = LABEL_WIDTH,
        )
    }
}

/// The six controls, in slider order, plus the keyboard selection
pub struct ControlPanel {
    controls: [RangeControl; 6],
    selected: usize,
}

impl ControlPanel {
    pub fn new(initial: TransformParams) -> Self {
        Self {
            controls: Param::ALL.map(|param| RangeControl::new(param, initial.get(param))),
            selected: 0,
        }
    }

    /// Snapshot of the current values
    pub fn params(&self) -> TransformParams {
        let mut params = TransformParams::identity();
        for control in &self.controls {
            params.set(control.param(), control.value());
        }
        params
    }

    pub fn controls(&self) -> &[RangeControl] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [RangeControl] {
        &mut self.controls
    }

    pub fn selected(&self) -> Param {
        self.controls[self.selected].param()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.controls.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
    }

    pub fn selected_mut(&mut self) -> &mut RangeControl {
        &mut self.controls[self.selected]
    }

    /// Put every control back to its initial value; true if any moved
    pub fn reset(&mut self) -> bool {
        self.controls
            .iter_mut()
            .fold(false, |changed, control| control.reset() | changed)
    }

    pub fn rows(&self, width: usize) -> Vec<String> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, control)| control.render(width, i == self.selected))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_values_and_labels() {
        let panel = ControlPanel::new(TransformParams::default());
        assert_eq!(panel.params(), TransformParams::default());
        let labels: Vec<_> = panel.controls().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            [
                "Rotate X°",
                "Rotate Y°",
                "Rotate Z°",
                "Translate X",
                "Translate Y",
                "Translate Z"
            ]
        );
    }

    #[test]
    fn test_set_value_clamps() {
        let mut control = RangeControl::new(Param::TranslateY, 0.0);
        assert!(control.set_value(12.0));
        assert_eq!(control.value(), 5.0);
        assert!(!control.set_value(7.0));
        assert!(control.set_value(-100.0));
        assert_eq!(control.value(), -5.0);
        assert!(!control.set_value(f64::NAN));
    }

    #[test]
    fn test_notifies_only_on_change() {
        let mut control = RangeControl::new(Param::RotateZ, 355.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            control.on_changed(move |change| seen.borrow_mut().push(change));
        }

        assert!(control.step(1.0, Step::Normal));
        assert!(!control.step(1.0, Step::Normal));
        assert!(!control.to_max());

        assert_eq!(
            *seen.borrow(),
            vec![ParamChange {
                param: Param::RotateZ,
                value: 360.0
            }]
        );
    }

    #[test]
    fn test_fine_steps_stay_on_grid() {
        let mut control = RangeControl::new(Param::TranslateX, -1.0);
        for _ in 0..3 {
            control.step(1.0, Step::Fine);
        }
        assert_eq!(control.value(), -0.85);
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = ControlPanel::new(TransformParams::default());
        assert_eq!(panel.selected(), Param::RotateX);
        panel.select_previous();
        assert_eq!(panel.selected(), Param::TranslateZ);
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.selected(), Param::RotateY);
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let initial = TransformParams::new(10.0, 20.0, 30.0, 1.0, 2.0, 3.0);
        let mut panel = ControlPanel::new(initial);
        assert!(!panel.reset());

        panel.selected_mut().to_max();
        panel.select_next();
        panel.selected_mut().step(-1.0, Step::Coarse);
        assert_ne!(panel.params(), initial);

        assert!(panel.reset());
        assert_eq!(panel.params(), initial);
    }

    #[test]
    fn test_track_knob_position() {
        let control = RangeControl::new(Param::TranslateZ, 0.0);
        assert_eq!(control.track(5), "──●──");
        let control = RangeControl::new(Param::RotateX, 0.0);
        assert_eq!(control.track(4), "●───");
        let control = RangeControl::new(Param::RotateX, 360.0);
        assert_eq!(control.track(4), "───●");
    }

    #[test]
    fn test_render_row() {
        let panel = ControlPanel::new(TransformParams::default());
        let rows = panel.rows(40);
        assert_eq!(rows.len(), 6);
        assert!(rows[0].starts_with("> Rotate X°"));
        assert!(rows[3].starts_with("  Translate X"));
        assert!(rows[3].ends_with("  -1.00"));
        assert_eq!(rows[0].chars().count(), 40);
    }
}
