use egui::{Align2, Color32, RichText, TextEdit, Window};

use crate::models::{FileInfo, Operation};

pub enum FileAction {
    Browse,
    Clear,
}

/// Radio group for the operation. Returns the raw value of the radio just clicked, if any.
pub fn draw_operation_choices(ui: &mut egui::Ui, current: Option<Operation>) -> Option<&'static str> {
    let mut clicked = None;
    ui.group(|ui| {
        ui.heading("Operation");
        for operation in Operation::all() {
            if ui.radio(current == Some(operation), operation.label()).clicked() {
                clicked = Some(operation.as_str());
            }
        }
    });
    clicked
}

pub fn draw_file_picker(ui: &mut egui::Ui, info: Option<&FileInfo>) -> Option<FileAction> {
    let mut action = None;
    ui.group(|ui| {
        ui.heading("File");
        ui.horizontal(|ui| {
            if ui.button("📂 Choose file…").clicked() {
                action = Some(FileAction::Browse);
            }
            if info.is_some() && ui.button("❌").on_hover_text("Clear selection").clicked() {
                action = Some(FileAction::Clear);
            }
        });

        if let Some(info) = info {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Selected File:").strong());
                ui.label(info.name.as_str());
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Size:").strong());
                ui.label(info.size.as_str());
            });
        } else {
            ui.label(RichText::new("Drop a file here or choose one").italics());
        }
    });
    action
}

/// Single-line input inside its own container. Returns true when the text changed.
pub fn draw_text_field(ui: &mut egui::Ui, label: &str, value: &mut String, masked: bool) -> bool {
    let mut changed = false;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(label);
            changed = ui
                .add(TextEdit::singleline(value).password(masked))
                .changed();
        });
    });
    changed
}

pub fn draw_status(ui: &mut egui::Ui, message: &str, is_error: bool) {
    if message.is_empty() {
        return;
    }
    if is_error {
        ui.colored_label(Color32::RED, format!("⚠️ {}", message));
    } else {
        ui.label(RichText::new(message).italics());
    }
}

/// Blocking alert. Returns true once the user dismisses it.
pub fn draw_alert(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    Window::new("Alert")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}
