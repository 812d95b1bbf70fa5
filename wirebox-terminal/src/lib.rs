//! Terminal front end: six keyboard sliders driving the wireframe box
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::cell::Cell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use wirebox_core::{Scene, TransformParams};

pub mod controls;
pub mod publisher;
pub mod renderer;

pub use controls::{ControlPanel, ParamChange, RangeControl, Step};
pub use publisher::{Publisher, PublisherError};
pub use renderer::Canvas;

/// Six slider rows plus the status line
const PANEL_ROWS: u16 = 7;
const MIN_PLOT_ROWS: u16 = 5;
const HELP: &str = "←/→ adjust (⇧ fine, PgUp/PgDn coarse)  ↑/↓ select  Home/End  r reset  a axes  q quit";

/// Latest pose reported by the controls and whether it still has to be drawn
struct RedrawRequest {
    params: Cell<TransformParams>,
    pending: Cell<bool>,
}

impl RedrawRequest {
    fn new(params: TransformParams) -> Self {
        Self {
            params: Cell::new(params),
            pending: Cell::new(true),
        }
    }

    fn record(&self, change: ParamChange) {
        let mut params = self.params.get();
        params.set(change.param, change.value);
        self.params.set(params);
        self.pending.set(true);
    }

    fn invalidate(&self) {
        self.pending.set(true);
    }

    fn take(&self) -> Option<TransformParams> {
        self.pending.replace(false).then(|| self.params.get())
    }
}

fn plot_rows(height: u16) -> u16 {
    height.saturating_sub(PANEL_ROWS)
}

/// Main application struct for the terminal box viewer
pub struct TerminalApp {
    scene: Scene,
    panel: ControlPanel,
    canvas: Canvas,
    request: Rc<RedrawRequest>,
    width: u16,
    height: u16,
    running: bool,
    repaint: bool,
    clear_screen: bool,
    drawn: Option<TransformParams>,
    redraw_count: u64,
}

impl TerminalApp {
    pub fn new(initial: TransformParams, show_axes: bool) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(initial, show_axes, width, height))
    }

    /// Build the app for a terminal of the given size without touching the real terminal
    pub fn with_size(initial: TransformParams, show_axes: bool, width: u16, height: u16) -> Self {
        let mut scene = Scene::default();
        scene.set_show_axes(show_axes);

        let mut panel = ControlPanel::new(initial);
        let request = Rc::new(RedrawRequest::new(panel.params()));
        // every control feeds the same handler
        let handler = {
            let request = Rc::clone(&request);
            move |change: ParamChange| request.record(change)
        };
        for control in panel.controls_mut() {
            control.on_changed(handler.clone());
        }

        if height < PANEL_ROWS + MIN_PLOT_ROWS {
            log::warn!("terminal is only {width}x{height}, the plot will be clipped");
        }

        Self {
            scene,
            panel,
            canvas: Canvas::new(width as usize, plot_rows(height) as usize),
            request,
            width,
            height,
            running: true,
            repaint: true,
            clear_screen: true,
            drawn: None,
            redraw_count: 0,
        }
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pose used for the most recent redraw
    pub fn drawn(&self) -> Option<TransformParams> {
        self.drawn
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        while self.running {
            self.update();
            self.render(&mut stdout)?;
            // idle until the next terminal event
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let fine = key.modifiers.contains(KeyModifiers::SHIFT);
        let step = if fine { Step::Fine } else { Step::Normal };

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up | KeyCode::BackTab => self.panel.select_previous(),
            KeyCode::Down | KeyCode::Tab => self.panel.select_next(),
            KeyCode::Left => {
                self.panel.selected_mut().step(-1.0, step);
            }
            KeyCode::Right => {
                self.panel.selected_mut().step(1.0, step);
            }
            KeyCode::PageDown => {
                self.panel.selected_mut().step(-1.0, Step::Coarse);
            }
            KeyCode::PageUp => {
                self.panel.selected_mut().step(1.0, Step::Coarse);
            }
            KeyCode::Home => {
                self.panel.selected_mut().to_min();
            }
            KeyCode::End => {
                self.panel.selected_mut().to_max();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.panel.reset();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let show = !self.scene.show_axes();
                self.scene.set_show_axes(show);
                self.request.invalidate();
            }
            _ => return,
        }
        self.repaint = true;
    }

    fn resize(&mut self, width: u16, height: u16) {
        log::debug!("resize to {width}x{height}");
        if height < PANEL_ROWS + MIN_PLOT_ROWS {
            log::warn!("terminal is only {width}x{height}, the plot will be clipped");
        }
        self.width = width;
        self.height = height;
        self.canvas.resize(width as usize, plot_rows(height) as usize);
        self.repaint = true;
        self.clear_screen = true;
    }

    /// Redraw the scene if any control changed since the last call
    pub fn update(&mut self) {
        if let Some(params) = self.request.take() {
            self.scene.redraw(params, &mut self.canvas);
            self.drawn = Some(params);
            self.redraw_count += 1;
        }
    }

    /// Write the plot and the control panel, if anything changed
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let canvas_dirty = self.canvas.take_repaint();
        if !canvas_dirty && !self.repaint {
            return Ok(());
        }
        self.repaint = false;

        if std::mem::replace(&mut self.clear_screen, false) {
            queue!(out, Clear(ClearType::All))?;
        }
        self.canvas.draw(out, 0)?;

        let top = plot_rows(self.height);
        let width = self.width as usize;
        let selected = self.panel.selected();
        for (i, (row, control)) in self
            .panel
            .rows(width)
            .into_iter()
            .zip(self.panel.controls())
            .enumerate()
        {
            let color = if control.param() == selected {
                Color::Yellow
            } else {
                Color::Reset
            };
            queue!(
                out,
                cursor::MoveTo(0, top + i as u16),
                SetForegroundColor(color),
                Print(truncate(&row, width)),
                Clear(ClearType::UntilNewLine),
            )?;
        }

        let status = match self.drawn {
            Some(params) => format!("{params}  | {HELP}"),
            None => HELP.to_string(),
        };
        queue!(
            out,
            cursor::MoveTo(0, top + PANEL_ROWS - 1),
            SetForegroundColor(Color::DarkGrey),
            Print(truncate(&status, width)),
            Clear(ClearType::UntilNewLine),
            ResetColor
        )?;

        out.flush()?;
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
