// SPDX-License-Identifier: MIT
//
// tinct — a terminal palette studio.
//
// This is the main binary that wires together all the crates:
//
//   tinct-color   → hex / RGB / HSL conversions
//   tinct-palette → palette, selection, generation, acquisition modes
//   tinct-extract → image decode + dominant-color extraction
//   tinct-term    → terminal control, rendering, input, event loop
//
// The Studio struct implements tinct-term's App trait, connecting the
// event loop to the palette state. Each keypress flows through:
//
//   stdin → parser → on_event → mode dispatch → session mutation
//   paint → framebuffer → renderer → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ title bar (INVERSE)          │  ← 1 row
//   │ mode tabs + parameters       │  ← 1 row
//   ├──────────────────────────────┤
//   │ content: color bands or      │
//   │ image preview (▀ half-block) │  ← h - 6 rows
//   ├──────────────────────────────┤
//   │ swatch strip                 │  ← 2 rows
//   │ detail line (HEX/RGB/HSL)    │  ← 1 row
//   │ status / notices             │  ← 1 row
//   └──────────────────────────────┘
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser as ClapParser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use tinct_color::Rgb;
use tinct_extract::{
    KmeansQuantizer, Loading, MAX_QUALITY, MIN_QUALITY, Quantizer, Surface,
};
use tinct_palette::{MAX_COLORS, MIN_COLORS, Mode, Session};
use tinct_term::buffer::FrameBuffer;
use tinct_term::cell::{Attr, Cell, CellColor};
use tinct_term::event_loop::{Action, App, EventLoop};
use tinct_term::input::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use tinct_term::terminal::Size;

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Debug, ClapParser)]
#[command(name = "tinct", version, about = "A terminal palette studio")]
struct Cli {
    /// Image to open in image mode on startup.
    image: Option<PathBuf>,

    /// Language preference to persist in the config file.
    #[arg(long, value_enum)]
    lang: Option<Language>,

    /// Write logs to this file (stdout belongs to the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// Interface language preference.
///
/// Only the preference is stored; translated string tables are a
/// separate concern for front ends that carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
enum Language {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    language: Language,
}

impl Config {
    fn path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|d| d.join("tinct").join("config.toml"))
    }

    /// Load the config file, falling back to defaults on any failure.
    /// A broken config file should never keep the app from starting.
    fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn save(&self) {
        let Some(path) = Self::path() else { return };
        let Ok(text) = toml::to_string_pretty(self) else {
            return;
        };
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = std::fs::write(&path, text) {
            tracing::warn!("could not save config {}: {e}", path.display());
        }
    }
}

// ─── UI State ───────────────────────────────────────────────────────────────

/// How long a status-line notice stays visible.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Spinner frames shown while an image decodes.
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

const DEFAULT_COLOR_COUNT: usize = 5;
const DEFAULT_QUALITY: usize = 10;

/// A transient status-line message.
struct Notice {
    text: String,
    expires: Instant,
}

/// Which representation the detail line shows for the selected color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DetailTab {
    #[default]
    Hex,
    Rgb,
    Hsl,
}

impl DetailTab {
    const fn next(self) -> Self {
        match self {
            Self::Hex => Self::Rgb,
            Self::Rgb => Self::Hsl,
            Self::Hsl => Self::Hex,
        }
    }
}

/// A screen rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Rect {
    const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// Where things landed in the last painted frame, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct Layout {
    tabs: Vec<(Rect, Mode)>,
    content: Rect,
    preview: Rect,
    swatches: Vec<Rect>,
}

// ─── Studio ─────────────────────────────────────────────────────────────────

/// The application: palette session plus everything the views need.
struct Studio {
    session: Session,
    rng: StdRng,
    color_count: usize,
    quality: usize,
    quantizer: KmeansQuantizer,

    /// Full-resolution decoded image, if one is open.
    surface: Option<Surface>,
    /// Thumbnail sized for the current preview area.
    preview: Option<Surface>,
    /// Dimensions the thumbnail was built for.
    preview_for: (u32, u32),
    /// In-flight background decode.
    loading: Option<Loading>,

    /// Eyedropper position in thumbnail pixel coordinates.
    crosshair: (u32, u32),
    /// Path being typed after `o`; `Some` while the prompt is open.
    prompt: Option<String>,
    notice: Option<Notice>,
    detail: DetailTab,
    spinner: usize,

    clipboard: Option<arboard::Clipboard>,
    layout: Layout,
}

impl Studio {
    fn new() -> Self {
        let mut studio = Self {
            session: Session::new(),
            rng: StdRng::from_entropy(),
            color_count: DEFAULT_COLOR_COUNT,
            quality: DEFAULT_QUALITY,
            quantizer: KmeansQuantizer::new(),
            surface: None,
            preview: None,
            preview_for: (0, 0),
            loading: None,
            crosshair: (0, 0),
            prompt: None,
            notice: None,
            detail: DetailTab::default(),
            spinner: 0,
            clipboard: None,
            layout: Layout::default(),
        };
        studio.regenerate();
        studio
    }

    fn notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            expires: Instant::now() + NOTICE_TTL,
        });
    }

    // ── Palette Actions ─────────────────────────────────────────────

    fn regenerate(&mut self) {
        if let Err(e) = self.session.generate(&mut self.rng, self.color_count) {
            self.notice(e.to_string());
        }
    }

    /// Re-run extraction against the open image (image mode only —
    /// eyedropper palettes come from sampling, not clustering).
    fn re_extract(&mut self) {
        if self.session.mode() != Mode::Image {
            return;
        }
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        match self.quantizer.quantize(surface, self.color_count, self.quality) {
            Ok(colors) => {
                if colors.is_empty() {
                    self.notice("image had no sampleable pixels");
                }
                self.session.apply_extraction(colors);
            }
            Err(e) => self.notice(e.to_string()),
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        if self.session.mode() == mode {
            return;
        }
        self.session.switch(mode);
        match mode {
            Mode::Random => self.regenerate(),
            Mode::Image => self.re_extract(),
            Mode::Eyedropper => {}
        }
    }

    fn adjust_count(&mut self, delta: isize) {
        let next = self
            .color_count
            .saturating_add_signed(delta)
            .clamp(MIN_COLORS, MAX_COLORS);
        if next == self.color_count {
            return;
        }
        self.color_count = next;
        match self.session.mode() {
            Mode::Random => self.regenerate(),
            Mode::Image => self.re_extract(),
            Mode::Eyedropper => {}
        }
    }

    fn adjust_quality(&mut self, delta: isize) {
        let next = self
            .quality
            .saturating_add_signed(delta)
            .clamp(MIN_QUALITY, MAX_QUALITY);
        if next == self.quality {
            return;
        }
        self.quality = next;
        self.re_extract();
    }

    fn copy_selected(&mut self) {
        let Some(color) = self.session.palette().selected_color() else {
            self.notice("no color selected");
            return;
        };
        let hex = color.hex();

        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => self.clipboard = Some(cb),
                Err(e) => {
                    self.notice(format!("clipboard unavailable: {e}"));
                    return;
                }
            }
        }
        if let Some(cb) = self.clipboard.as_mut() {
            match cb.set_text(hex.clone()) {
                Ok(()) => self.notice(format!("copied {hex}")),
                Err(e) => self.notice(format!("copy failed: {e}")),
            }
        }
    }

    // ── Image Loading ───────────────────────────────────────────────

    fn open_image(&mut self, path: impl Into<PathBuf>) {
        self.session.switch(Mode::Image);
        self.start_loading(path);
    }

    fn start_loading(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::info!("decoding {}", path.display());
        self.loading = Some(Loading::start(path));
        self.spinner = 0;
    }

    fn finish_loading(&mut self, result: Result<Surface, tinct_extract::ExtractError>) {
        match result {
            Ok(surface) => {
                self.notice(format!("loaded {}×{}", surface.width(), surface.height()));
                self.surface = Some(surface);
                // Force a thumbnail rebuild; the crosshair re-centers then.
                self.preview = None;
                self.preview_for = (0, 0);
                self.re_extract();
            }
            // Decode failure keeps whatever palette was there before.
            Err(e) => self.notice(e.to_string()),
        }
    }

    // ── Eyedropper ──────────────────────────────────────────────────

    /// Rebuild the preview thumbnail if the content area or image changed.
    fn ensure_preview(&mut self, content: Rect) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let max_w = u32::from(content.w.saturating_sub(2));
        let max_h = u32::from(content.h.saturating_sub(1)) * 2;
        if max_w == 0 || max_h == 0 {
            return;
        }
        let fresh = self.preview.is_none();
        if !fresh && self.preview_for == (max_w, max_h) {
            return;
        }

        let thumb = surface.thumbnail(max_w, max_h);
        if fresh {
            self.crosshair = (thumb.width() / 2, thumb.height() / 2);
        } else {
            self.crosshair.0 = self.crosshair.0.min(thumb.width().saturating_sub(1));
            self.crosshair.1 = self.crosshair.1.min(thumb.height().saturating_sub(1));
        }
        self.preview = Some(thumb);
        self.preview_for = (max_w, max_h);
    }

    fn move_crosshair(&mut self, dx: i64, dy: i64) {
        let Some(thumb) = self.preview.as_ref() else {
            return;
        };
        if thumb.width() == 0 || thumb.height() == 0 {
            return;
        }
        let (x, y) = self.crosshair;
        let nx = i64::from(x).saturating_add(dx).clamp(0, i64::from(thumb.width()) - 1);
        let ny = i64::from(y).saturating_add(dy).clamp(0, i64::from(thumb.height()) - 1);
        self.crosshair = (nx as u32, ny as u32);
    }

    /// Sample the full-resolution pixel under a thumbnail coordinate.
    fn sample_at(&self, tx: u32, ty: u32) -> Option<Rgb> {
        let thumb = self.preview.as_ref()?;
        let surface = self.surface.as_ref()?;
        let fx = scale_coord(tx, thumb.width(), surface.width());
        let fy = scale_coord(ty, thumb.height(), surface.height());
        surface.pixel(fx, fy)
    }

    fn sample_crosshair(&mut self) {
        let (tx, ty) = self.crosshair;
        if let Some(color) = self.sample_at(tx, ty) {
            self.session.sample_replacing(color);
        }
    }

    // ── Key Dispatch ────────────────────────────────────────────────

    fn on_key(&mut self, key: KeyEvent) -> Action {
        if self.prompt.is_some() {
            self.on_prompt_key(key);
            return Action::Continue;
        }

        if key.modifiers.contains(Modifiers::CTRL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') => return Action::Quit,

            KeyCode::Char('1') => self.switch_mode(Mode::Random),
            KeyCode::Char('2') => self.switch_mode(Mode::Image),
            KeyCode::Char('3') => self.switch_mode(Mode::Eyedropper),
            KeyCode::Tab => {
                let next = self.session.mode().next();
                self.switch_mode(next);
            }

            KeyCode::Char('g') if self.session.mode() == Mode::Random => self.regenerate(),

            KeyCode::Char('+' | '=') => self.adjust_count(1),
            KeyCode::Char('-' | '_') => self.adjust_count(-1),
            KeyCode::Char('[') => self.adjust_quality(-1),
            KeyCode::Char(']') => self.adjust_quality(1),

            KeyCode::Char('o') if self.session.mode() != Mode::Random => {
                self.prompt = Some(String::new());
            }

            KeyCode::Char('c') => self.copy_selected(),
            KeyCode::Char('x') => self.detail = self.detail.next(),

            KeyCode::Left if self.session.mode() == Mode::Eyedropper => {
                self.move_crosshair(-1, 0);
            }
            KeyCode::Right if self.session.mode() == Mode::Eyedropper => {
                self.move_crosshair(1, 0);
            }
            KeyCode::Up if self.session.mode() == Mode::Eyedropper => {
                self.move_crosshair(0, -1);
            }
            KeyCode::Down if self.session.mode() == Mode::Eyedropper => {
                self.move_crosshair(0, 1);
            }
            KeyCode::Enter if self.session.mode() == Mode::Eyedropper => {
                self.sample_crosshair();
            }

            KeyCode::Left => self.session.palette_mut().select_prev(),
            KeyCode::Right => self.session.palette_mut().select_next(),

            _ => {}
        }
        Action::Continue
    }

    fn on_prompt_key(&mut self, key: KeyEvent) {
        let Some(input) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Escape => self.prompt = None,
            KeyCode::Enter => {
                let path = std::mem::take(input);
                self.prompt = None;
                if !path.is_empty() {
                    self.start_loading(path);
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                input.push(c);
            }
            _ => {}
        }
    }

    // ── Mouse Dispatch ──────────────────────────────────────────────

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.session.palette_mut().select_prev(),
            MouseEventKind::ScrollDown => self.session.palette_mut().select_next(),
            MouseEventKind::Press(MouseButton::Left) => self.on_click(mouse.x, mouse.y),
            _ => {}
        }
    }

    fn on_click(&mut self, x: u16, y: u16) {
        let layout = self.layout.clone();

        for (rect, mode) in &layout.tabs {
            if rect.contains(x, y) {
                self.switch_mode(*mode);
                return;
            }
        }

        for (i, rect) in layout.swatches.iter().enumerate() {
            if rect.contains(x, y) {
                self.session.palette_mut().select(i);
                return;
            }
        }

        if layout.preview.contains(x, y) && self.surface.is_some() {
            let tx = u32::from(x - layout.preview.x);
            // Each preview row covers two thumbnail rows; click the upper.
            let ty = u32::from(y - layout.preview.y) * 2;
            match self.session.mode() {
                Mode::Eyedropper => {
                    self.crosshair = (tx, ty);
                    if let Some(color) = self.sample_at(tx, ty) {
                        self.session.sample_replacing(color);
                    }
                }
                // Outside eyedropper mode, clicked pixels accumulate.
                Mode::Image | Mode::Random => {
                    if let Some(color) = self.sample_at(tx, ty) {
                        self.session.sample_accumulating(color);
                    }
                }
            }
        }
    }
}

/// Map a coordinate from one pixel range to another.
fn scale_coord(v: u32, from: u32, to: u32) -> u32 {
    if from == 0 || to == 0 {
        return 0;
    }
    (((u64::from(v) * u64::from(to)) / u64::from(from)) as u32).min(to - 1)
}

/// Black or white, whichever reads against `color` as a background.
fn contrast_fg(color: Rgb) -> CellColor {
    let luma = 0.299f64.mul_add(
        f64::from(color.r),
        0.587f64.mul_add(f64::from(color.g), 0.114 * f64::from(color.b)),
    );
    if luma > 140.0 {
        CellColor::Rgb(0, 0, 0)
    } else {
        CellColor::Rgb(255, 255, 255)
    }
}

const fn cell_color(color: Rgb) -> CellColor {
    CellColor::Rgb(color.r, color.g, color.b)
}

// ─── App Implementation ─────────────────────────────────────────────────────

impl App for Studio {
    fn on_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                Action::Continue
            }
        }
    }

    fn on_resize(&mut self, _size: Size) {
        // The thumbnail is rebuilt lazily against the new content area.
        self.preview_for = (0, 0);
    }

    fn on_tick(&mut self) -> bool {
        let mut dirty = false;

        let finished = self.loading.as_mut().and_then(Loading::try_finish);
        if let Some(result) = finished {
            self.loading = None;
            self.finish_loading(result);
            dirty = true;
        } else if self.loading.is_some() {
            self.spinner = self.spinner.wrapping_add(1);
            dirty = true;
        }

        if let Some(notice) = &self.notice {
            if Instant::now() >= notice.expires {
                self.notice = None;
                dirty = true;
            }
        }

        dirty
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        let (w, h) = (buf.width(), buf.height());
        if w < 24 || h < 10 {
            buf.draw_str(
                0,
                0,
                "terminal too small",
                CellColor::Default,
                CellColor::Default,
                Attr::empty(),
            );
            return;
        }

        let mut layout = Layout {
            content: Rect { x: 0, y: 2, w, h: h - 6 },
            ..Layout::default()
        };

        self.paint_title(buf, w);
        self.paint_tabs(buf, &mut layout, w);

        match self.session.mode() {
            Mode::Random => self.paint_bands(buf, layout.content),
            Mode::Image => self.paint_preview(buf, &mut layout, false),
            Mode::Eyedropper => self.paint_preview(buf, &mut layout, true),
        }

        self.paint_swatches(buf, &mut layout, h - 4, w);
        self.paint_detail(buf, h - 2);
        self.paint_status(buf, h - 1, w);

        self.layout = layout;
    }
}

// ─── Views ──────────────────────────────────────────────────────────────────

impl Studio {
    fn paint_title(&self, buf: &mut FrameBuffer, w: u16) {
        buf.fill_rect(0, 0, w, 1, Cell::styled(' ', CellColor::Default, CellColor::Default, Attr::INVERSE));
        buf.draw_str(
            1,
            0,
            "tinct — palette studio",
            CellColor::Default,
            CellColor::Default,
            Attr::INVERSE | Attr::BOLD,
        );
    }

    fn paint_tabs(&self, buf: &mut FrameBuffer, layout: &mut Layout, w: u16) {
        let tabs = [
            (Mode::Random, "[1] Random"),
            (Mode::Image, "[2] Image"),
            (Mode::Eyedropper, "[3] Eyedropper"),
        ];

        let mut x = 1;
        for (mode, label) in tabs {
            let attrs = if mode == self.session.mode() {
                Attr::BOLD | Attr::INVERSE
            } else {
                Attr::DIM
            };
            let end = buf.draw_str(x, 1, label, CellColor::Default, CellColor::Default, attrs);
            layout.tabs.push((
                Rect { x, y: 1, w: end - x, h: 1 },
                mode,
            ));
            x = end + 2;
        }

        let params = format!("colors {}  quality {}", self.color_count, self.quality);
        let px = w.saturating_sub(params.len() as u16 + 1);
        if px > x {
            buf.draw_str(px, 1, &params, CellColor::Default, CellColor::Default, Attr::DIM);
        }
    }

    /// Random mode: the palette as full-height color bands with hex labels.
    fn paint_bands(&self, buf: &mut FrameBuffer, content: Rect) {
        let colors: Vec<Rgb> = self.session.palette().colors().to_vec();
        if colors.is_empty() {
            buf.draw_str(
                content.x + 2,
                content.y + 1,
                "press g to generate a palette",
                CellColor::Default,
                CellColor::Default,
                Attr::DIM,
            );
            return;
        }

        let band_w = content.w / colors.len() as u16;
        if band_w == 0 {
            return;
        }
        for (i, color) in colors.iter().enumerate() {
            let x = content.x + i as u16 * band_w;
            // The last band absorbs the division remainder.
            let wd = if i == colors.len() - 1 {
                content.w - i as u16 * band_w
            } else {
                band_w
            };
            buf.fill_rect(
                x,
                content.y,
                wd,
                content.h,
                Cell::styled(' ', CellColor::Default, cell_color(*color), Attr::empty()),
            );

            let hex = color.hex();
            if wd > hex.len() as u16 {
                let lx = x + (wd - hex.len() as u16) / 2;
                buf.draw_str(
                    lx,
                    content.y + content.h / 2,
                    &hex,
                    contrast_fg(*color),
                    cell_color(*color),
                    Attr::empty(),
                );
            }
        }
    }

    /// Image / eyedropper mode: the thumbnail as ▀ half-block cells, two
    /// image rows per terminal row.
    fn paint_preview(&mut self, buf: &mut FrameBuffer, layout: &mut Layout, crosshair: bool) {
        let content = layout.content;

        if self.surface.is_none() {
            let hint = if self.loading.is_some() {
                "decoding image..."
            } else {
                "press o to open an image"
            };
            buf.draw_str(
                content.x + 2,
                content.y + 1,
                hint,
                CellColor::Default,
                CellColor::Default,
                Attr::DIM,
            );
            return;
        }

        self.ensure_preview(content);
        let Some(thumb) = self.preview.as_ref() else {
            return;
        };

        let cols = thumb.width() as u16;
        let rows = (thumb.height() as u16).div_ceil(2);
        let x0 = content.x + (content.w.saturating_sub(cols)) / 2;
        let y0 = content.y + (content.h.saturating_sub(rows)) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let upper = thumb.pixel(u32::from(col), u32::from(row) * 2);
                let lower = thumb.pixel(u32::from(col), u32::from(row) * 2 + 1);
                let fg = upper.map_or(CellColor::Default, cell_color);
                let bg = lower.map_or(CellColor::Default, cell_color);
                buf.set(x0 + col, y0 + row, Cell::styled('▀', fg, bg, Attr::empty()));
            }
        }

        if crosshair {
            let (cx, cy) = self.crosshair;
            let col = x0 + cx as u16;
            let row = y0 + (cy / 2) as u16;
            if let Some(cell) = buf.get(col, row) {
                let marked = Cell { attrs: cell.attrs | Attr::INVERSE, ..*cell };
                buf.set(col, row, marked);
            }
        }

        layout.preview = Rect { x: x0, y: y0, w: cols, h: rows };
    }

    fn paint_swatches(&self, buf: &mut FrameBuffer, layout: &mut Layout, y: u16, w: u16) {
        let palette = self.session.palette();
        if palette.is_empty() {
            return;
        }

        let count = palette.len() as u16;
        let each = (w / count).clamp(2, 8);
        let mut x = (w.saturating_sub(each * count)) / 2;

        for (i, color) in palette.colors().iter().enumerate() {
            let swatch = Rect { x, y, w: each, h: 2 };
            buf.fill_rect(
                swatch.x,
                swatch.y,
                swatch.w,
                swatch.h,
                Cell::styled(' ', CellColor::Default, cell_color(*color), Attr::empty()),
            );
            if palette.selected_index() == Some(i) {
                buf.set(
                    swatch.x + swatch.w / 2,
                    swatch.y + 1,
                    Cell::styled('●', contrast_fg(*color), cell_color(*color), Attr::empty()),
                );
            }
            layout.swatches.push(swatch);
            x += each;
        }
    }

    fn paint_detail(&self, buf: &mut FrameBuffer, y: u16) {
        // The path prompt borrows this row while it is open.
        if let Some(input) = &self.prompt {
            let line = format!("open: {input}▏");
            buf.draw_str(1, y, &line, CellColor::Default, CellColor::Default, Attr::BOLD);
            return;
        }

        let Some(color) = self.session.palette().selected_color() else {
            buf.draw_str(1, y, "no color selected", CellColor::Default, CellColor::Default, Attr::DIM);
            return;
        };

        let line = match self.detail {
            DetailTab::Hex => format!("HEX  {}", color.hex()),
            DetailTab::Rgb => format!("RGB  {}, {}, {}", color.r, color.g, color.b),
            DetailTab::Hsl => {
                let (h, s, l) = color.to_hsl().rounded();
                format!("HSL  {h}°, {s}%, {l}%")
            }
        };
        let end = buf.draw_str(1, y, &line, CellColor::Default, CellColor::Default, Attr::BOLD);

        buf.draw_str(
            end + 2,
            y,
            "(x cycles)",
            CellColor::Default,
            CellColor::Default,
            Attr::DIM,
        );
    }

    fn paint_status(&self, buf: &mut FrameBuffer, y: u16, w: u16) {
        if let Some(notice) = &self.notice {
            buf.fill_rect(0, y, w, 1, Cell::styled(' ', CellColor::Default, CellColor::Default, Attr::INVERSE));
            buf.draw_str(1, y, &notice.text, CellColor::Default, CellColor::Default, Attr::INVERSE);
            return;
        }

        if let Some(loading) = &self.loading {
            let frame = SPINNER[self.spinner % SPINNER.len()];
            let line = format!("{frame} decoding {}", loading.path().display());
            buf.draw_str(1, y, &line, CellColor::Default, CellColor::Default, Attr::DIM);
            return;
        }

        let help = match self.session.mode() {
            Mode::Random => "g regenerate  +/- colors  ←→ select  c copy  x detail  q quit",
            Mode::Image => "o open  +/- colors  [/] quality  ←→ select  c copy  q quit",
            Mode::Eyedropper => "o open  arrows move  enter/click sample  c copy  q quit",
        };
        buf.draw_str(1, y, help, CellColor::Default, CellColor::Default, Attr::DIM);
    }
}

// ─── Entry Point ────────────────────────────────────────────────────────────

fn init_tracing(log_file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = Config::load();
    if let Some(lang) = cli.lang {
        config.language = lang;
        config.save();
    }

    anyhow::ensure!(
        tinct_term::terminal::is_tty(),
        "tinct needs an interactive terminal"
    );

    let mut studio = Studio::new();
    if let Some(path) = cli.image {
        studio.open_image(path);
    }

    let mut event_loop = EventLoop::new()?;
    event_loop.run(&mut studio)?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tinct_term::input::press;

    use super::*;

    fn key(c: char) -> Event {
        press(KeyCode::Char(c))
    }

    #[test]
    fn detail_tab_cycles_through_all_three() {
        let tab = DetailTab::Hex;
        assert_eq!(tab.next(), DetailTab::Rgb);
        assert_eq!(tab.next().next(), DetailTab::Hsl);
        assert_eq!(tab.next().next().next(), DetailTab::Hex);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect { x: 2, y: 3, w: 4, h: 2 };
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config { language: Language::Zh };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.language, Language::Zh);
    }

    #[test]
    fn config_defaults_when_fields_are_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn language_serializes_lowercase() {
        let text = toml::to_string(&Config { language: Language::En }).unwrap();
        assert!(text.contains("\"en\""));
    }

    #[test]
    fn studio_starts_with_a_random_palette() {
        let studio = Studio::new();
        assert_eq!(studio.session.mode(), Mode::Random);
        assert_eq!(studio.session.palette().len(), DEFAULT_COLOR_COUNT);
        assert_eq!(studio.session.palette().selected_index(), Some(0));
    }

    #[test]
    fn quit_keys() {
        let mut studio = Studio::new();
        assert_eq!(studio.on_event(key('q')), Action::Quit);
        assert_eq!(
            studio.on_event(Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: Modifiers::CTRL,
            })),
            Action::Quit
        );
    }

    #[test]
    fn number_keys_switch_modes_and_clear_the_palette() {
        let mut studio = Studio::new();
        assert!(!studio.session.palette().is_empty());

        studio.on_event(key('2'));
        assert_eq!(studio.session.mode(), Mode::Image);
        assert!(studio.session.palette().is_empty());

        studio.on_event(key('3'));
        assert_eq!(studio.session.mode(), Mode::Eyedropper);

        studio.on_event(key('1'));
        assert_eq!(studio.session.mode(), Mode::Random);
        // Back in random mode a fresh palette appears immediately.
        assert_eq!(studio.session.palette().len(), DEFAULT_COLOR_COUNT);
    }

    #[test]
    fn tab_cycles_modes() {
        let mut studio = Studio::new();
        studio.on_event(press(KeyCode::Tab));
        assert_eq!(studio.session.mode(), Mode::Image);
        studio.on_event(press(KeyCode::Tab));
        assert_eq!(studio.session.mode(), Mode::Eyedropper);
        studio.on_event(press(KeyCode::Tab));
        assert_eq!(studio.session.mode(), Mode::Random);
    }

    #[test]
    fn repeating_the_current_mode_key_keeps_the_palette() {
        let mut studio = Studio::new();
        let before = studio.session.palette().colors().to_vec();
        studio.on_event(key('1'));
        assert_eq!(studio.session.palette().colors(), before.as_slice());
    }

    #[test]
    fn count_adjustment_clamps_to_bounds() {
        let mut studio = Studio::new();
        for _ in 0..20 {
            studio.on_event(key('+'));
        }
        assert_eq!(studio.color_count, MAX_COLORS);
        assert_eq!(studio.session.palette().len(), MAX_COLORS);

        for _ in 0..20 {
            studio.on_event(key('-'));
        }
        assert_eq!(studio.color_count, MIN_COLORS);
        assert_eq!(studio.session.palette().len(), MIN_COLORS);
    }

    #[test]
    fn quality_adjustment_clamps_to_bounds() {
        let mut studio = Studio::new();
        for _ in 0..30 {
            studio.on_event(key(']'));
        }
        assert_eq!(studio.quality, MAX_QUALITY);
        for _ in 0..30 {
            studio.on_event(key('['));
        }
        assert_eq!(studio.quality, MIN_QUALITY);
    }

    #[test]
    fn arrow_keys_move_the_selection() {
        let mut studio = Studio::new();
        assert_eq!(studio.session.palette().selected_index(), Some(0));
        studio.on_event(press(KeyCode::Right));
        assert_eq!(studio.session.palette().selected_index(), Some(1));
        studio.on_event(press(KeyCode::Left));
        assert_eq!(studio.session.palette().selected_index(), Some(0));
    }

    #[test]
    fn prompt_collects_a_path() {
        let mut studio = Studio::new();
        studio.on_event(key('2'));
        studio.on_event(key('o'));
        assert!(studio.prompt.is_some());

        for c in "a.png".chars() {
            studio.on_event(key(c));
        }
        assert_eq!(studio.prompt.as_deref(), Some("a.png"));

        studio.on_event(press(KeyCode::Backspace));
        assert_eq!(studio.prompt.as_deref(), Some("a.pn"));

        studio.on_event(press(KeyCode::Escape));
        assert!(studio.prompt.is_none());
    }

    #[test]
    fn prompt_submit_starts_a_decode() {
        let mut studio = Studio::new();
        studio.on_event(key('2'));
        studio.on_event(key('o'));
        for c in "missing.png".chars() {
            studio.on_event(key(c));
        }
        studio.on_event(press(KeyCode::Enter));
        assert!(studio.prompt.is_none());
        assert!(studio.loading.is_some());
    }

    #[test]
    fn prompt_swallows_mode_keys() {
        let mut studio = Studio::new();
        studio.on_event(key('2'));
        studio.on_event(key('o'));
        studio.on_event(key('1'));
        assert_eq!(studio.session.mode(), Mode::Image);
        assert_eq!(studio.prompt.as_deref(), Some("1"));
    }

    #[test]
    fn open_key_is_ignored_in_random_mode() {
        let mut studio = Studio::new();
        studio.on_event(key('o'));
        assert!(studio.prompt.is_none());
    }

    #[test]
    fn failed_decode_keeps_the_prior_palette() {
        let mut studio = Studio::new();
        studio.on_event(key('2'));
        studio.session.apply_extraction(vec![Rgb::new(1, 2, 3)]);

        studio.finish_loading(Err(tinct_extract::ExtractError::ImageLoadFailed(
            "no such file".into(),
        )));
        assert_eq!(studio.session.palette().colors(), &[Rgb::new(1, 2, 3)]);
        assert!(studio.notice.is_some());
    }

    #[test]
    fn detail_key_cycles_representation() {
        let mut studio = Studio::new();
        assert_eq!(studio.detail, DetailTab::Hex);
        studio.on_event(key('x'));
        assert_eq!(studio.detail, DetailTab::Rgb);
        studio.on_event(key('x'));
        assert_eq!(studio.detail, DetailTab::Hsl);
    }

    #[test]
    fn scale_coord_maps_endpoints() {
        assert_eq!(scale_coord(0, 10, 100), 0);
        assert_eq!(scale_coord(5, 10, 100), 50);
        assert_eq!(scale_coord(9, 10, 100), 90);
        // Degenerate source range maps to the origin.
        assert_eq!(scale_coord(3, 0, 100), 0);
    }

    #[test]
    fn contrast_fg_picks_readable_text() {
        assert_eq!(contrast_fg(Rgb::new(255, 255, 255)), CellColor::Rgb(0, 0, 0));
        assert_eq!(contrast_fg(Rgb::new(0, 0, 0)), CellColor::Rgb(255, 255, 255));
        assert_eq!(contrast_fg(Rgb::new(255, 255, 0)), CellColor::Rgb(0, 0, 0));
    }

    #[test]
    fn paint_fits_any_buffer_size() {
        let mut studio = Studio::new();
        for (w, h) in [(10, 5), (24, 10), (80, 24), (200, 60)] {
            let mut buf = FrameBuffer::new(w, h);
            studio.paint(&mut buf);
        }
    }

    #[test]
    fn paint_records_tab_and_swatch_hit_boxes() {
        let mut studio = Studio::new();
        let mut buf = FrameBuffer::new(80, 24);
        studio.paint(&mut buf);
        assert_eq!(studio.layout.tabs.len(), 3);
        assert_eq!(studio.layout.swatches.len(), DEFAULT_COLOR_COUNT);
    }

    #[test]
    fn clicking_a_tab_switches_mode() {
        let mut studio = Studio::new();
        let mut buf = FrameBuffer::new(80, 24);
        studio.paint(&mut buf);

        let (rect, mode) = studio.layout.tabs[1];
        assert_eq!(mode, Mode::Image);
        studio.on_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Press(MouseButton::Left),
            x: rect.x,
            y: rect.y,
            modifiers: Modifiers::empty(),
        }));
        assert_eq!(studio.session.mode(), Mode::Image);
    }

    #[test]
    fn clicking_a_swatch_selects_it() {
        let mut studio = Studio::new();
        let mut buf = FrameBuffer::new(80, 24);
        studio.paint(&mut buf);

        let rect = studio.layout.swatches[2];
        studio.on_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Press(MouseButton::Left),
            x: rect.x,
            y: rect.y,
            modifiers: Modifiers::empty(),
        }));
        assert_eq!(studio.session.palette().selected_index(), Some(2));
    }

    #[test]
    fn scroll_moves_the_selection() {
        let mut studio = Studio::new();
        studio.on_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            x: 0,
            y: 0,
            modifiers: Modifiers::empty(),
        }));
        assert_eq!(studio.session.palette().selected_index(), Some(1));
    }
}
