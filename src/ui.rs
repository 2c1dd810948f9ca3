use eframe::egui;
use egui::{Align, Align2, Color32, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::app::DashboardEvent;
use crate::auth::{AuthMode, AuthView};
use crate::dashboard::{Dashboard, LoadState};
use crate::form::WorkoutForm;
use crate::list::{self, RowAction, RowDetail, CARDIO_LABEL, EMPTY_MESSAGE};
use crate::models::MuscleGroup;

const ALL_GROUPS: &str = "All muscle groups";

fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::from_rgb(220, 80, 80)));
}

/// Draws the login/register card. Returns true when submit was pressed.
pub fn show_auth(ui: &mut Ui, view: &mut AuthView) -> bool {
    let mut submit = false;
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Workout Log").heading().size(40.0).strong());
        ui.add_space(20.0);

        let title = match view.mode {
            AuthMode::Login => "Log in",
            AuthMode::Register => "Create an account",
        };
        ui.label(RichText::new(title).size(28.0).strong());
        ui.add_space(10.0);

        if let Some(error) = view.error() {
            error_label(ui, error);
        }
        if let Some(notice) = view.notice() {
            ui.label(RichText::new(notice).color(Color32::from_rgb(90, 170, 90)));
        }

        ui.add(
            egui::TextEdit::singleline(&mut view.username)
                .hint_text("Username")
                .desired_width(280.0),
        );
        let password = ui.add(
            egui::TextEdit::singleline(&mut view.password)
                .hint_text("Password")
                .password(true)
                .desired_width(280.0),
        );
        let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = match (view.mode, view.is_pending()) {
            (AuthMode::Login, false) => "Log in",
            (AuthMode::Login, true) => "Logging in...",
            (AuthMode::Register, false) => "Register",
            (AuthMode::Register, true) => "Registering...",
        };
        let clicked = ui
            .add_enabled(view.can_submit(), egui::Button::new(label))
            .clicked();
        submit = clicked || (enter && view.can_submit());

        ui.add_space(10.0);
        let toggle = match view.mode {
            AuthMode::Login => "Need an account? Register",
            AuthMode::Register => "Already have an account? Log in",
        };
        if ui.link(toggle).clicked() {
            view.toggle_mode();
        }

        ui.add_space(30.0);
        match view.server_status() {
            Some(Ok(status)) => {
                ui.label(RichText::new(format!("Server: {status}")).small());
            }
            Some(Err(e)) => {
                ui.label(RichText::new(format!("Server unreachable: {e}")).small().weak());
            }
            None => {}
        }
    });
    submit
}

pub fn show_dashboard(ctx: &egui::Context, ui: &mut Ui, dashboard: &mut Dashboard) -> Vec<DashboardEvent> {
    let mut events = Vec::new();

    ui.horizontal(|ui| {
        ui.label(RichText::new("My Workouts").heading().strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Log out").clicked() {
                events.push(DashboardEvent::Logout);
            }
            if ui.button("Refresh").clicked() {
                events.push(DashboardEvent::Refresh);
            }
        });
    });
    ui.separator();

    if let Some(error) = dashboard.error() {
        error_label(ui, error);
    }

    let saving = dashboard.is_saving();
    match dashboard.form_mut() {
        Some(form) => show_form(ui, form, saving, &mut events),
        None => {
            if ui.button("+ Log a workout").clicked() {
                events.push(DashboardEvent::NewWorkout);
            }
        }
    }
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Filter:");
        let current = dashboard.page().filter;
        let mut filter = current;
        egui::ComboBox::from_id_salt("muscle_group_filter")
            .selected_text(filter.map_or(ALL_GROUPS, |g| g.as_str()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter, None, ALL_GROUPS);
                for group in MuscleGroup::ALL {
                    ui.selectable_value(&mut filter, Some(group), group.as_str());
                }
            });
        if filter != current {
            events.push(DashboardEvent::Filter(filter));
        }
    });
    ui.add_space(10.0);

    match dashboard.load_state() {
        LoadState::Idle | LoadState::Loading if dashboard.records().is_empty() => {
            ui.spinner();
        }
        LoadState::Failed(message) => error_label(ui, message),
        _ => {}
    }

    if let Some(action) = show_list(ui, dashboard) {
        events.push(match action {
            RowAction::Edit(id) => DashboardEvent::Edit(id),
            RowAction::Delete(id) => DashboardEvent::Delete(id),
        });
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(dashboard.can_go_previous(), egui::Button::new("Previous"))
            .clicked()
        {
            events.push(DashboardEvent::Previous);
        }
        let page = dashboard.page();
        ui.label(format!("Page {} of {}", page.current_page, page.total_pages));
        if ui
            .add_enabled(dashboard.can_go_next(), egui::Button::new("Next"))
            .clicked()
        {
            events.push(DashboardEvent::Next);
        }
    });

    if let Some(record) = dashboard.pending_delete() {
        egui::Window::new("Delete workout?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Are you sure you want to delete \"{}\"?",
                    record.exercise_name
                ));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        events.push(DashboardEvent::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        events.push(DashboardEvent::CancelDelete);
                    }
                });
            });
    }

    events
}

fn show_form(ui: &mut Ui, form: &mut WorkoutForm, saving: bool, events: &mut Vec<DashboardEvent>) {
    let title = if form.editing.is_some() {
        "Edit workout"
    } else {
        "Log a workout"
    };
    ui.group(|ui| {
        ui.label(RichText::new(title).strong());
        egui::Grid::new("workout_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Exercise");
                ui.text_edit_singleline(&mut form.exercise_name);
                ui.end_row();

                ui.label("Muscle group");
                egui::ComboBox::from_id_salt("form_muscle_group")
                    .selected_text(form.muscle_group.as_str())
                    .show_ui(ui, |ui| {
                        for group in MuscleGroup::ALL {
                            ui.selectable_value(&mut form.muscle_group, group, group.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Cardio");
                ui.checkbox(&mut form.is_cardio, "");
                ui.end_row();

                let enabled = form.strength_inputs_enabled();
                ui.label("Weight (kg)");
                ui.add_enabled(enabled, egui::TextEdit::singleline(&mut form.weight_kg));
                ui.end_row();

                ui.label("Sets");
                ui.add_enabled(enabled, egui::TextEdit::singleline(&mut form.sets));
                ui.end_row();

                ui.label("Reps");
                ui.add_enabled(enabled, egui::TextEdit::singleline(&mut form.reps));
                ui.end_row();
            });

        let missing = form.missing_required();
        if !missing.is_empty() {
            ui.label(RichText::new(format!("Required: {}", missing.join(", "))).small().weak());
        }
        ui.horizontal(|ui| {
            let label = if saving { "Saving..." } else { "Save" };
            if ui
                .add_enabled(missing.is_empty() && !saving, egui::Button::new(label))
                .clicked()
            {
                events.push(DashboardEvent::SaveForm);
            }
            if ui.button("Cancel").clicked() {
                events.push(DashboardEvent::CancelForm);
            }
        });
    });
}

fn show_list(ui: &mut Ui, dashboard: &Dashboard) -> Option<RowAction> {
    let rows = list::rows(dashboard.records());
    if rows.is_empty() {
        if dashboard.load_state() == &LoadState::Loaded {
            ui.label(RichText::new(EMPTY_MESSAGE).italics());
        }
        return None;
    }

    let mut action = None;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto())
        .header(28.0, |mut header| {
            for title in ["Exercise", "Group", "Weight", "Sets x Reps", "Volume", "Logged", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &rows {
                body.row(30.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(RichText::new(&row.exercise_name).strong());
                    });
                    table_row.col(|ui| {
                        ui.label(&row.muscle_group);
                    });
                    match &row.detail {
                        RowDetail::Cardio => {
                            table_row.col(|ui| {
                                ui.label(RichText::new(CARDIO_LABEL).italics());
                            });
                            table_row.col(|_| {});
                            table_row.col(|_| {});
                        }
                        RowDetail::Strength {
                            weight,
                            sets_reps,
                            volume,
                        } => {
                            table_row.col(|ui| {
                                ui.label(weight);
                            });
                            table_row.col(|ui| {
                                ui.label(sets_reps);
                            });
                            table_row.col(|ui| {
                                ui.label(volume);
                            });
                        }
                    }
                    table_row.col(|ui| {
                        ui.label(&row.logged_on);
                    });
                    table_row.col(|ui| {
                        if ui.small_button("Edit").clicked() {
                            action = Some(RowAction::Edit(row.id));
                        }
                        if ui.small_button("Delete").clicked() {
                            action = Some(RowAction::Delete(row.id));
                        }
                    });
                });
            }
        });
    action
}
