use std::path::PathBuf;

use eframe::{egui, App, CreationContext, Frame};
use egui::{Color32, ComboBox, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::DatePickerButton;
use tracing::error;

use crate::catalog::Catalog;
use crate::export::{self, layout::COLUMNS, ExportOptions};
use crate::form::FormAction;
use crate::models::{Day, Exercise, ExerciseField, Schedule};

#[derive(Debug, PartialEq)]
enum ExportStatus {
    Saved(PathBuf),
    Failed(String),
}

impl ExportStatus {
    fn message(&self) -> String {
        match self {
            ExportStatus::Saved(path) => format!("Saved {}", path.display()),
            ExportStatus::Failed(e) => format!("Export failed: {}", e),
        }
    }
}

/// Base style with the planner's body and heading sizes.
pub fn planner_style(base: &egui::Style) -> egui::Style {
    let mut style = base.clone();
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(16.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(22.0, egui::FontFamily::Proportional),
    );
    style
}

fn rest_label(rest: &str) -> String {
    if rest.is_empty() {
        "Rest".to_string()
    } else {
        format!("{} min", rest)
    }
}

fn update(day: usize, index: usize, field: ExerciseField, value: impl Into<String>) -> FormAction {
    FormAction::UpdateExercise {
        day,
        index,
        field,
        value: value.into(),
    }
}

pub struct PlannerApp {
    schedule: Schedule,
    catalog: Catalog,
    export: ExportOptions,
    status: Option<ExportStatus>,
}

impl PlannerApp {
    pub fn new(_cc: &CreationContext, catalog: Catalog, export: ExportOptions) -> Self {
        PlannerApp {
            schedule: Schedule::starting_today(),
            catalog,
            export,
            status: None,
        }
    }

    fn export_pdf(&mut self) {
        self.status = Some(match export::export_to_file(&self.schedule, &self.export) {
            Ok(path) => ExportStatus::Saved(path),
            Err(e) => {
                error!("export failed: {}", e);
                ExportStatus::Failed(e.to_string())
            }
        });
    }

    fn show_header(&self, ui: &mut Ui, actions: &mut Vec<FormAction>) {
        ui.group(|ui| {
            let mut title = self.schedule.title.clone();
            let response = ui.add(
                TextEdit::singleline(&mut title)
                    .hint_text("Schedule title")
                    .font(egui::TextStyle::Heading)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                actions.push(FormAction::SetTitle(title));
            }

            ui.horizontal(|ui| {
                ui.label("Start date:");
                let mut date = self.schedule.start_date;
                if ui
                    .add(DatePickerButton::new(&mut date).id_salt("start_date"))
                    .changed()
                {
                    actions.push(FormAction::SetStartDate(date));
                }
            });
        });
    }

    fn show_day(&self, ui: &mut Ui, d: usize, day: &Day, actions: &mut Vec<FormAction>) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading(&day.name);
                if ui.small_button("Remove day").clicked() {
                    actions.push(FormAction::RemoveDay { day: d });
                }
            });

            egui::Grid::new(("exercises", d))
                .num_columns(COLUMNS.len() + 1)
                .striped(true)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    for title in COLUMNS {
                        ui.label(RichText::new(title).strong());
                    }
                    ui.label("");
                    ui.end_row();

                    for (i, exercise) in day.exercises.iter().enumerate() {
                        self.show_exercise(ui, d, i, exercise, actions);
                        ui.end_row();
                    }
                });

            if ui.button("+ Add Exercise").clicked() {
                actions.push(FormAction::AddExercise { day: d });
            }
        });
    }

    fn show_exercise(
        &self,
        ui: &mut Ui,
        d: usize,
        i: usize,
        exercise: &Exercise,
        actions: &mut Vec<FormAction>,
    ) {
        preset_input(
            ui,
            (d, i, ExerciseField::Name),
            &exercise.name,
            "Exercise name",
            &self.catalog.exercises,
            actions,
        );
        preset_input(
            ui,
            (d, i, ExerciseField::Sets),
            &exercise.sets,
            "3x12",
            &self.catalog.sets,
            actions,
        );

        ComboBox::from_id_salt(("rest", d, i))
            .selected_text(rest_label(&exercise.rest_minutes))
            .show_ui(ui, |ui| {
                for rest in &self.catalog.rest_minutes {
                    if ui
                        .selectable_label(exercise.rest_minutes == *rest, rest_label(rest))
                        .clicked()
                    {
                        actions.push(update(d, i, ExerciseField::RestMinutes, rest.as_str()));
                    }
                }
            });

        let selected = match self.catalog.video_label(&exercise.video_url) {
            Some(name) => name.to_string(),
            None if exercise.video_url.is_empty() => "Select a video".to_string(),
            None => exercise.video_url.clone(),
        };
        ComboBox::from_id_salt(("video", d, i))
            .selected_text(selected)
            .width(160.0)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(exercise.video_url.is_empty(), "Select a video")
                    .clicked()
                {
                    actions.push(update(d, i, ExerciseField::VideoUrl, ""));
                }
                for (name, url) in self.catalog.video_options(&exercise.name) {
                    if ui.selectable_label(exercise.video_url == url, name).clicked() {
                        actions.push(update(d, i, ExerciseField::VideoUrl, url));
                    }
                }
            });

        if ui
            .button(RichText::new("×").color(Color32::RED))
            .on_hover_text("Remove exercise")
            .clicked()
        {
            actions.push(FormAction::RemoveExercise { day: d, index: i });
        }
    }
}

/// Free text field with a dropdown of presets beside it.
fn preset_input(
    ui: &mut Ui,
    (d, i, field): (usize, usize, ExerciseField),
    value: &str,
    hint: &str,
    presets: &[String],
    actions: &mut Vec<FormAction>,
) {
    ui.horizontal(|ui| {
        let mut text = value.to_string();
        if ui
            .add(TextEdit::singleline(&mut text).hint_text(hint).desired_width(140.0))
            .changed()
        {
            actions.push(update(d, i, field, text));
        }
        ComboBox::from_id_salt(("preset", d, i, field))
            .selected_text("")
            .width(20.0)
            .show_ui(ui, |ui| {
                for preset in presets {
                    if ui.selectable_label(value == preset, preset).clicked() {
                        actions.push(update(d, i, field, preset.as_str()));
                    }
                }
            });
    });
}

impl App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut actions = Vec::new();
        let mut export_requested = false;

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("+ Add Day").clicked() {
                    actions.push(FormAction::AddDay);
                }
                if ui
                    .button(RichText::new("Export PDF").strong())
                    .clicked()
                {
                    export_requested = true;
                }
                if let Some(status) = &self.status {
                    let color = match status {
                        ExportStatus::Saved(_) => Color32::GREEN,
                        ExportStatus::Failed(_) => Color32::RED,
                    };
                    ui.label(RichText::new(status.message()).color(color));
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.show_header(ui, &mut actions);
                ui.add_space(10.0);
                for (d, day) in self.schedule.days.iter().enumerate() {
                    self.show_day(ui, d, day, &mut actions);
                    ui.add_space(10.0);
                }
            });
        });

        for action in actions {
            self.schedule.apply(action);
        }
        if export_requested {
            self.export_pdf();
        }
    }
}
