use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::create::{CreateField, CreateStudentForm};
use crate::controller::delete::{DeleteField, DeleteStudentForm};
use crate::controller::events::UiEvent;
use crate::controller::list::{StudentListView, EMPTY_NOTICE};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Home,
    Create,
    Delete,
    List,
}

impl AppView {
    fn label(self) -> &'static str {
        match self {
            AppView::Home => "Home",
            AppView::Create => "Create Student",
            AppView::Delete => "Delete Student",
            AppView::List => "View Students",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Create(CreateField),
    Delete(DeleteField),
}

pub struct RegistryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    view: AppView,

    create: CreateStudentForm,
    delete: DeleteStudentForm,
    list: StudentListView,

    status: String,
    focus: Option<FocusTarget>,
}

impl RegistryApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            view: AppView::Home,
            create: CreateStudentForm::new(),
            delete: DeleteStudentForm::new(),
            list: StudentListView::new(),
            status: "Ready".to_string(),
            focus: None,
        }
    }

    /// Drains backend events; each one is a single controller transition.
    /// Controllers outlive view switches, so a late response for a view
    /// that is no longer showing lands harmlessly in its controller.
    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StudentCreated(student) => {
                    self.create.apply_success(&student);
                    self.status = self.create.message().unwrap_or("Student created").to_string();
                }
                UiEvent::CreateFailed(message) => {
                    self.status = message.clone();
                    self.create.apply_failure(message);
                }
                UiEvent::StudentDeleted { message } => {
                    self.status = message.clone();
                    self.delete.apply_success(message);
                }
                UiEvent::DeleteFailed(message) => {
                    self.status = message.clone();
                    self.delete.apply_failure(message);
                }
                UiEvent::StudentsLoaded(students) => {
                    self.status = format!("{} student(s) loaded", students.len());
                    self.list.apply_success(students);
                }
                UiEvent::ListFailed(message) => {
                    self.status = message.clone();
                    self.list.apply_failure(message);
                }
                UiEvent::BackendUnavailable(message) => {
                    self.status = message;
                }
            }
        }
    }

    fn switch_to(&mut self, view: AppView) {
        self.view = view;
        self.focus = None;
        // Entering the list view counts as a mount: fetch immediately.
        if view == AppView::List {
            self.refresh_students();
        }
    }

    fn refresh_students(&mut self) {
        self.list.begin_refresh();
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::ListStudents, &mut self.status) {
            self.list.apply_failure(self.status.clone());
        }
    }

    fn submit_create(&mut self) {
        match self.create.begin_submit() {
            Ok(request) => {
                self.status = "Creating student...".to_string();
                if !dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::CreateStudent(request),
                    &mut self.status,
                ) {
                    self.create.apply_failure(self.status.clone());
                }
            }
            Err(field) => {
                self.status = format!("{} is required", field.label());
                self.focus = Some(FocusTarget::Create(field));
            }
        }
    }

    fn submit_delete(&mut self) {
        match self.delete.begin_submit() {
            Ok(request) => {
                self.status = "Deleting student...".to_string();
                if !dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::DeleteStudent(request),
                    &mut self.status,
                ) {
                    self.delete.apply_failure(self.status.clone());
                }
            }
            Err(field) => {
                self.status = format!("{} is required", field.label());
                self.focus = Some(FocusTarget::Delete(field));
            }
        }
    }

    fn show_nav(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Student Registry");
                ui.separator();
                for view in [AppView::Create, AppView::Delete, AppView::List] {
                    if ui.selectable_label(self.view == view, view.label()).clicked() {
                        self.switch_to(view);
                    }
                }
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.server_url).weak());
                });
            });
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.add_space((ui.available_height() * 0.25).clamp(24.0, 160.0));
        ui.vertical_centered(|ui| {
            ui.heading("Welcome to the Student Management App");
            ui.add_space(6.0);
            ui.label("Select a menu option above to begin.");
        });
    }

    fn show_create_form(&mut self, ui: &mut egui::Ui) {
        let focus = match self.focus.take() {
            Some(FocusTarget::Create(field)) => Some(field),
            other => {
                self.focus = other;
                None
            }
        };

        form_card(ui, |ui| {
            ui.heading("Create Student");
            ui.add_space(4.0);

            let first = labeled_text_field(
                ui,
                "First Name",
                "Ada",
                &mut self.create.first_name,
                focus == Some(CreateField::FirstName),
            );
            let last = labeled_text_field(
                ui,
                "Last Name",
                "Lovelace",
                &mut self.create.last_name,
                focus == Some(CreateField::LastName),
            );
            let email = labeled_text_field(
                ui,
                "Email",
                "ada@example.com",
                &mut self.create.email,
                focus == Some(CreateField::Email),
            );
            let dob = labeled_text_field(
                ui,
                "Date of Birth (YYYY-MM-DD)",
                "1815-12-10",
                &mut self.create.dob,
                focus == Some(CreateField::Dob),
            );

            let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
            let submitted_via_enter = enter_pressed
                && [&first, &last, &email, &dob]
                    .iter()
                    .any(|response| response.lost_focus());

            ui.add_space(6.0);
            let clicked = ui
                .add_enabled(
                    !self.create.is_submitting(),
                    egui::Button::new("Register").min_size(egui::vec2(ui.available_width(), 32.0)),
                )
                .clicked();
            if clicked || submitted_via_enter {
                self.submit_create();
            }

            if let Some(message) = self.create.message() {
                ui.add_space(6.0);
                ui.weak(message);
            }
        });
    }

    fn show_delete_form(&mut self, ui: &mut egui::Ui) {
        let focus = match self.focus.take() {
            Some(FocusTarget::Delete(field)) => Some(field),
            other => {
                self.focus = other;
                None
            }
        };

        form_card(ui, |ui| {
            ui.heading("Delete Student");
            ui.add_space(4.0);

            let email = labeled_text_field(
                ui,
                "Email",
                "ada@example.com",
                &mut self.delete.email,
                focus == Some(DeleteField::Email),
            );
            let first = labeled_text_field(
                ui,
                "First Name",
                "Ada",
                &mut self.delete.first_name,
                focus == Some(DeleteField::FirstName),
            );

            let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
            let submitted_via_enter = enter_pressed
                && [&email, &first]
                    .iter()
                    .any(|response| response.lost_focus());

            ui.add_space(6.0);
            let clicked = ui
                .add_enabled(
                    !self.delete.is_submitting(),
                    egui::Button::new("Delete").min_size(egui::vec2(ui.available_width(), 32.0)),
                )
                .clicked();
            if clicked || submitted_via_enter {
                self.submit_delete();
            }

            if let Some(message) = self.delete.message() {
                ui.add_space(6.0);
                ui.weak(message);
            }
        });
    }

    fn show_student_list(&mut self, ui: &mut egui::Ui) {
        let mut refresh_clicked = false;
        ui.horizontal(|ui| {
            ui.heading("All Students");
            if self.list.is_loading() {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                refresh_clicked = ui.button("Refresh").clicked();
            });
        });
        if refresh_clicked {
            self.refresh_students();
        }
        ui.add_space(6.0);

        if let Some(error) = self.list.error() {
            ui.colored_label(ui.visuals().error_fg_color, error);
            ui.add_space(4.0);
        }
        if self.list.shows_empty_notice() {
            ui.label(EMPTY_NOTICE);
            return;
        }

        egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
            for student in self.list.students() {
                ui.push_id(student.id.0, |ui| {
                    ui.add_space(4.0);
                    ui.strong(student.full_name());
                    ui.label(&student.email);
                    ui.weak(&student.dob);
                    ui.add_space(4.0);
                    ui.separator();
                });
            }
        });
    }

    fn show_create_success_modal(&mut self, ctx: &egui::Context) {
        let response = egui::Window::new("Student Created")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("The student has been successfully registered!");
                if let Some(message) = self.create.message() {
                    ui.weak(message);
                }
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.create.dismiss_modal();
                }
            });
        // Clicking outside the content region also dismisses.
        if let Some(inner) = response {
            if inner.response.clicked_elsewhere() {
                self.create.dismiss_modal();
            }
        }
    }
}

impl eframe::App for RegistryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_nav(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            AppView::Home => self.show_home(ui),
            AppView::Create => self.show_create_form(ui),
            AppView::Delete => self.show_delete_form(ui),
            AppView::List => self.show_student_list(ui),
        });

        if self.create.modal_open() {
            self.show_create_success_modal(ctx);
        }

        // Backend events arrive off-frame; keep polling at a slow tick.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn form_card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    let avail = ui.available_size();
    let card_width = avail.x.clamp(360.0, 460.0);
    ui.add_space((avail.y * 0.06).clamp(12.0, 48.0));
    ui.vertical_centered(|ui| {
        ui.set_width(card_width);
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color.gamma_multiply(0.55))
            .corner_radius(12.0)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .inner_margin(egui::Margin::symmetric(18, 16))
            .show(ui, |ui| {
                ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);
                add(ui);
            });
    });
}

fn labeled_text_field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    request_focus: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    if request_focus {
        response.request_focus();
    }
    response
}
