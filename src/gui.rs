//! Native viewer using egui
//!
//! Renders the three selection steps as tile grids with colored badges.
//! All state changes go through [`Session`]; the viewer only draws the
//! current state and forwards clicks.

use eframe::egui::{self, Color32, RichText};
use tracing::info;

use crate::color::{self, HexColor};
use crate::config::Config;
use crate::filter::filter_items;
use crate::index::Indexes;
use crate::session::{Session, Step};

const TILE_HEIGHT: f32 = 54.0;

/// Run the native viewer
pub fn run_viewer(config: Config, indexes: Indexes) -> anyhow::Result<()> {
    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(TriosApp::new(cc, config, indexes)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

/// User input collected while drawing, applied after the frame
enum Action {
    SelectFirst(String),
    SelectSecond(String),
    Back,
    Copy,
}

struct TriosApp {
    title: String,
    grid_columns: usize,
    indexes: Indexes,
    session: Session,
    search: String,
}

impl TriosApp {
    fn new(cc: &eframe::CreationContext<'_>, config: Config, indexes: Indexes) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            title: config.title,
            grid_columns: config.grid_columns,
            indexes,
            session: Session::new(),
            search: String::new(),
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action) {
        let changed = match action {
            Action::SelectFirst(value) => self.session.select_first(&value),
            Action::SelectSecond(value) => self.session.select_second(&value),
            Action::Back => self.session.back(),
            Action::Copy => {
                if self.session.request_copy(&self.indexes) {
                    let text = self.session.copy_text().to_string();
                    ctx.output_mut(|o| o.copied_text = text);
                    info!("Copy text placed on clipboard");
                }
                false
            }
        };

        // Search text belongs to the step it was typed on
        if changed {
            self.search.clear();
        }
    }

    fn badges(&self, ui: &mut egui::Ui) {
        let first = self.session.first();
        let second = self.session.second();
        if first.is_none() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            if let Some(first) = first {
                badge(ui, first, self.indexes.first_color(first));
                if let Some(second) = second {
                    badge(ui, second, self.indexes.pair_color(first, second));
                }
            }
        });
        ui.add_space(6.0);
    }

    fn search_box(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
    }

    fn pick_first(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        ui.label("Choose your first ingredient");
        self.search_box(ui);

        let items = filter_items(self.indexes.firsts(), &self.search);
        tile_grid(ui, &items, self.grid_columns).map(Action::SelectFirst)
    }

    fn pick_second(&mut self, ui: &mut egui::Ui, first: &str) -> Option<Action> {
        ui.label(format!("Choose your second ingredient for {}", first));
        self.search_box(ui);

        if back_button(ui) {
            return Some(Action::Back);
        }

        let items = filter_items(self.indexes.seconds_sorted(first), &self.search);
        tile_grid(ui, &items, self.grid_columns).map(Action::SelectSecond)
    }

    fn show_triples(&self, ui: &mut egui::Ui, first: &str, second: &str) -> Option<Action> {
        ui.label(format!("Trios for {} + {}", first, second));

        if back_button(ui) {
            return Some(Action::Back);
        }

        let thirds = self.session.thirds(&self.indexes).unwrap_or_default();
        if thirds.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new("No trios for this pair.").italics());
            return None;
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for third in &thirds {
                badge(ui, third, self.indexes.triple_color(first, second, third));
            }
        });

        ui.add_space(8.0);
        egui::Grid::new("trios_table")
            .striped(true)
            .num_columns(3)
            .min_col_width(160.0)
            .show(ui, |ui| {
                ui.strong("First");
                ui.strong("Second");
                ui.strong("Third");
                ui.end_row();
                for third in &thirds {
                    ui.label(first);
                    ui.label(second);
                    ui.label(third);
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        let mut action = None;
        if ui.button("📋 Copy").clicked() {
            action = Some(Action::Copy);
        }

        if self.session.copy_box_visible() {
            let mut text = self.session.copy_text();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            );
            ui.label(RichText::new("Copied to the clipboard. You can also select the text above.").small());
        }

        action
    }
}

impl eframe::App for TriosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            ui.add_space(4.0);
            self.badges(ui);

            egui::ScrollArea::vertical().show(ui, |ui| {
                // Owned copy so the step can be read while `self` is borrowed mutably
                action = match self.session.step().clone() {
                    Step::PickFirst => self.pick_first(ui),
                    Step::PickSecond { first } => self.pick_second(ui, &first),
                    Step::ShowTriples { first, second } => self.show_triples(ui, &first, &second),
                };
            });
        });

        if let Some(action) = action {
            self.apply(ctx, action);
        }
    }
}

fn to_color32(hex: &str) -> Color32 {
    let [r, g, b] = color::parse_rgb(hex)
        .or_else(|| color::parse_rgb(color::DEFAULT_COLOR))
        .unwrap_or([0xE5, 0xE7, 0xEB]);
    Color32::from_rgb(r, g, b)
}

/// Rounded label filled with `bg` and a readable text color
fn badge(ui: &mut egui::Ui, text: &str, bg: &HexColor) {
    egui::Frame::none()
        .fill(to_color32(bg.as_str()))
        .rounding(999.0)
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).strong().color(to_color32(bg.text_color())));
        });
}

fn back_button(ui: &mut egui::Ui) -> bool {
    let clicked = ui
        .add_sized([ui.available_width(), 28.0], egui::Button::new("← Back"))
        .clicked();
    ui.add_space(4.0);
    clicked
}

/// Items as rows of `columns` equal-width tiles; returns the clicked item
fn tile_grid(ui: &mut egui::Ui, items: &[String], columns: usize) -> Option<String> {
    let mut clicked = None;

    for row in items.chunks(columns.max(1)) {
        ui.columns(columns.max(1), |cols| {
            for (col, item) in cols.iter_mut().zip(row) {
                let width = col.available_width();
                let button = egui::Button::new(RichText::new(item).strong()).rounding(16.0);
                if col.add_sized([width, TILE_HEIGHT], button).on_hover_text(item).clicked() {
                    clicked = Some(item.clone());
                }
            }
        });
    }

    clicked
}
