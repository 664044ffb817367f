use std::path::Path;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{error, info, warn};

use crate::controller::FormController;
use crate::dispatch::{spawn_dispatch, DispatchResult};
use crate::models::SelectedFile;
use crate::settings::Settings;
use crate::ui::{self, FileAction};

pub struct FormApp {
    pub controller: FormController,
    pub settings: Settings,
    pub dark_mode: bool,
    pub password_input: String,
    pub hash_input: String,
    pub alert: Option<String>,
    pub status_message: String,
    pub status_is_error: bool,
    pub dispatch_rx: Option<Receiver<DispatchResult>>,
}

impl FormApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            controller: FormController::new(),
            dark_mode: settings.window.dark_mode,
            settings,
            password_input: String::new(),
            hash_input: String::new(),
            alert: None,
            status_message: String::new(),
            status_is_error: false,
            dispatch_rx: None,
        }
    }

    pub fn select_path(&mut self, path: &Path) {
        match SelectedFile::from_path(path) {
            Ok(file) => self.controller.handle_file_selection(Some(file)),
            Err(e) => {
                error!("Could not read {:?}: {}", path, e);
                self.controller.handle_file_selection(None);
                self.set_status(format!("Could not read file: {}", e), true);
            }
        }
    }

    pub fn submit(&mut self) {
        if self.dispatch_rx.is_some() {
            return;
        }

        match self.controller.handle_submit() {
            Ok(submission) => {
                let (result_tx, result_rx) = crossbeam_channel::bounded(1);
                self.set_status(format!("Sending {} request…", submission.operation), false);
                spawn_dispatch(self.settings.server.clone(), submission, result_tx);
                self.dispatch_rx = Some(result_rx);
            }
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    pub fn poll_dispatch(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.dispatch_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(outcome)) => {
                let message = if outcome.body.is_empty() {
                    format!("Done ({})", outcome.status)
                } else {
                    format!("Done ({}): {}", outcome.status, outcome.body)
                };
                self.set_status(message, false);
                self.dispatch_rx = None;
            }
            Ok(Err(e)) => {
                self.set_status(e.to_string(), true);
                self.dispatch_rx = None;
            }
            Err(TryRecvError::Empty) => ctx.request_repaint_after(Duration::from_millis(100)),
            Err(TryRecvError::Disconnected) => {
                warn!("Dispatch thread ended without a result");
                self.set_status("Submission was interrupted".to_string(), true);
                self.dispatch_rx = None;
            }
        }
    }

    /// Enter submits only while the form is usable.
    pub fn handle_submit_key(&mut self) {
        if self.alert.is_some() || self.dispatch_rx.is_some() {
            return;
        }
        self.submit();
    }

    pub fn handle_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        info!("Files dropped: {} files", dropped.len());
        match dropped.iter().find_map(|f| f.path.clone()) {
            Some(path) => self.select_path(&path),
            None => {
                warn!("Dropped file has no path");
                self.set_status("Error: Dropped file has no path".to_string(), true);
            }
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = message;
        self.status_is_error = is_error;
    }

    fn draw_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("File Operations");
        ui.checkbox(&mut self.dark_mode, "Dark Mode");
        ui.separator();

        match ui::draw_file_picker(ui, self.controller.file_info()) {
            Some(FileAction::Browse) => {
                if let Some(path) = rfd::FileDialog::new().pick_file() {
                    self.select_path(&path);
                }
            }
            Some(FileAction::Clear) => self.controller.handle_file_selection(None),
            None => {}
        }

        if let Some(raw) = ui::draw_operation_choices(ui, self.controller.operation()) {
            if let Err(e) = self.controller.handle_operation_change(raw) {
                self.alert = Some(e.to_string());
            }
        }

        let visibility = self.controller.visibility();
        if visibility.password
            && ui::draw_text_field(ui, "Password:", &mut self.password_input, true)
        {
            self.controller.set_password(self.password_input.clone());
        }
        if visibility.hash
            && ui::draw_text_field(ui, "Snapshot hash:", &mut self.hash_input, false)
        {
            self.controller.set_hash_digest(self.hash_input.clone());
        }

        ui.add_space(8.0);
        let in_flight = self.dispatch_rx.is_some();
        let clicked = ui.add_enabled(!in_flight, egui::Button::new("Submit")).clicked();
        if clicked {
            self.submit();
        } else if ui.is_enabled() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.handle_submit_key();
        }
        if in_flight {
            ui.spinner();
        }

        ui.separator();
        ui::draw_status(ui, &self.status_message, self.status_is_error);
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.poll_dispatch(ctx);

        let form_enabled = self.alert.is_none();
        if form_enabled {
            self.handle_drops(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(form_enabled, |ui| self.draw_form(ui));
        });

        if let Some(message) = &self.alert {
            if ui::draw_alert(ctx, message) {
                self.alert = None;
            }
        }
    }
}
