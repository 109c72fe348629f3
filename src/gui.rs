use clap::Command;
use eframe::egui;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints};
use log::warn;
use strum::IntoEnumIterator;

use synthplot::config::{POINTS_RANGE, SEED_RANGE};
use synthplot::{init_logging, Bin, ClosedSide, Column, Config, Record, Session, Summary};

struct SynthPlotApp {
    session: Session,
    points: i64,
    seed: u64,
    closed: ClosedSide,
    views: Views,
    last_error: String,
}

/// Derived chart inputs, rebuilt when the session revision moves
struct Views {
    revision: Option<u64>,
    bins: Vec<Bin>,
    summary: Option<Summary>,
}

impl SynthPlotApp {
    fn new(config: Config) -> synthplot::Result<Self> {
        Ok(Self {
            session: Session::new(&config)?,
            points: config.points,
            seed: config.seed,
            closed: config.closed,
            views: Views {
                revision: None,
                bins: vec![],
                summary: None,
            },
            last_error: "".to_string(),
        })
    }

    fn sync_params(&mut self) {
        if let Err(e) = self.session.set_params(self.points, self.seed) {
            warn!("Keeping previous dataset: {}", e);
            self.last_error = format!("Error generating data: {}", e);
        }
        self.session.set_closed(self.closed);
    }

    fn views(&mut self) -> &Views {
        let revision = self.session.revision();
        if self.views.revision != Some(revision) {
            self.views = Views {
                revision: Some(revision),
                bins: self.session.bins(),
                summary: self.session.summary(),
            };
        }
        &self.views
    }
}

impl eframe::App for SynthPlotApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::SidePanel::left("parameters").show(ctx, |ui| {
            ui.heading("Parameters");
            ui.separator();
            ui.add(egui::Slider::new(&mut self.points, POINTS_RANGE).text("Points"));
            ui.horizontal(|ui| {
                ui.label("Seed: ");
                ui.add(egui::DragValue::new(&mut self.seed).clamp_range(SEED_RANGE));
            });
            egui::ComboBox::new("closed", "Closed side")
                .selected_text(self.closed.to_string())
                .show_ui(ui, |ui| {
                    for side in ClosedSide::iter() {
                        ui.selectable_value(&mut self.closed, side, side.to_string());
                    }
                });
        });

        self.sync_params();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.heading("Synthetic Data Explorer");
                ui.label("Use the side panel to generate new data");

                ui.separator();
                ui.heading("Charts");

                ui.label("Line");
                draw_line(ui, self.session.dataset().records());

                ui.label("Bars (mean of y per interval of x)");
                let views = self.views();
                draw_bars(ui, &views.bins);
                ui.label("Box plot of y");
                draw_box(ui, views.summary.as_ref());

                ui.separator();
                ui.heading("Data");
                ui.label("This table can be edited directly");
                if let Err(e) = draw_table(ui, &mut self.session) {
                    self.last_error = format!("Error editing table: {}", e);
                }

                ui.separator();
                egui::CollapsingHeader::new("Last Error:")
                    .default_open(false)
                    .show(ui, |ui| {
                        ui.code(&self.last_error);
                    });
            });
        });
    }
}

fn draw_line(ui: &mut egui::Ui, records: &[Record]) {
    let series = |column: Column| {
        Line::new(
            records
                .iter()
                .enumerate()
                .map(|(i, r)| [i as f64, r.get(column)])
                .collect::<PlotPoints>(),
        )
        .name(column.to_string())
    };

    Plot::new("line")
        .height(250.0)
        .legend(Legend::default())
        .x_axis_label("row")
        .show(ui, |plot_ui| {
            plot_ui.line(series(Column::Y));
            plot_ui.line(series(Column::X));
        });
}

fn draw_bars(ui: &mut egui::Ui, bins: &[Bin]) {
    if bins.is_empty() {
        ui.label("No data to bin");
        return;
    }
    // bins without records have no bar
    let bars: Vec<Bar> = bins
        .iter()
        .enumerate()
        .filter_map(|(i, bin)| {
            bin.mean.map(|mean| {
                Bar::new(i as f64, mean)
                    .width(0.9)
                    .name(format!("Interval: {}\nMean of y: {:.4}\nCount: {}", bin.label, mean, bin.count))
            })
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("mean(y)")
        .element_formatter(Box::new(|bar, _chart| bar.name.clone()));

    Plot::new("bars")
        .height(300.0)
        .x_axis_label("interval of x (bin index)")
        .y_axis_label("mean of y")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });

    egui::CollapsingHeader::new("Intervals")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("intervals").striped(true).show(ui, |ui| {
                ui.strong("#");
                ui.strong("Interval");
                ui.strong("Count");
                ui.strong("Mean of y");
                ui.end_row();
                for (i, bin) in bins.iter().enumerate() {
                    ui.label(i.to_string());
                    ui.label(bin.label.as_str());
                    ui.label(bin.count.to_string());
                    ui.label(bin.mean.map_or("-".to_string(), |m| format!("{:.4}", m)));
                    ui.end_row();
                }
            });
        });
}

fn draw_box(ui: &mut egui::Ui, summary: Option<&Summary>) {
    let Some(s) = summary else {
        ui.label("No data to summarize");
        return;
    };
    let elem = BoxElem::new(0.0, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
        .name("y")
        .box_width(0.5);

    Plot::new("box")
        .height(300.0)
        .y_axis_label("distribution of y")
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name("y"));
        });

    ui.horizontal(|ui| {
        ui.label(format!("Min: {:.4}", s.min));
        ui.label(format!("Max: {:.4}", s.max));
        ui.label(format!("Mean: {:.4}", s.mean));
        ui.label(format!("IQR: {:.4}", s.iqr()));
    });
}

/// Editable table; edits are applied after the grid is drawn
fn draw_table(ui: &mut egui::Ui, session: &mut Session) -> synthplot::Result<()> {
    let mut edits = Vec::new();
    let mut rows_to_remove = Vec::new();

    egui::Grid::new("dataset").striped(true).show(ui, |ui| {
        ui.strong("");
        ui.strong("x");
        ui.strong("y");
        ui.end_row();
        for (row, record) in session.dataset().iter().enumerate() {
            if ui.small_button("x").on_hover_text("Remove row").clicked() {
                rows_to_remove.push(row);
            }
            for column in Column::iter() {
                let mut value = record.get(column);
                if ui.add(egui::DragValue::new(&mut value).speed(0.01)).changed() {
                    edits.push((row, column, value));
                }
            }
            ui.end_row();
        }
    });

    if ui.button("Add row").clicked() {
        session.push_row(Record::default());
    }

    for (row, column, value) in edits {
        session.edit(row, column, value)?;
    }
    // remove in reverse order
    for &row in rows_to_remove.iter().rev() {
        session.remove_row(row)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = Command::new("synthplot-gui")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive explorer for a seeded synthetic dataset")
        .args(Config::args())
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let config = Config::from_matches(&matches)?;
    let app = SynthPlotApp::new(config)?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Synthplot",
        options,
        Box::new(|_| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))
}
