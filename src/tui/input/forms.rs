use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Status;
use crate::tui::app::{App, Mode, NameForm, NamePurpose, SubtaskField, TaskForm};
use crate::tui::line_input::LineInput;

pub(super) fn open_create_form(app: &mut App, status: Status) {
    app.task_form = Some(TaskForm::create(status));
    app.mode = Mode::TaskForm;
}

pub(super) fn open_edit_form(app: &mut App) {
    let Some(task) = app.focus.and_then(|id| app.store.active_board().task(id)) else {
        return;
    };
    app.task_form = Some(TaskForm::edit(task));
    app.mode = Mode::TaskForm;
}

pub(super) fn open_name_form(app: &mut App, purpose: NamePurpose, initial: &str) {
    app.name_form = Some(NameForm {
        purpose,
        input: LineInput::new(initial),
    });
    app.mode = Mode::NameForm;
}

fn close_task_form(app: &mut App) {
    app.task_form = None;
    app.mode = Mode::Navigate;
}

pub(super) fn handle_task_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.task_form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => close_task_form(app),
        (_, KeyCode::Enter) => save_task_form(app),
        (_, KeyCode::Tab) => {
            let last = form.field_count() - 1;
            let last_is_blank = last > 0 && form.subtasks[last - 1].input.is_blank();
            if form.field < last {
                form.field += 1;
            } else if last_is_blank {
                form.field = 0;
            } else {
                form.subtasks.push(SubtaskField {
                    input: LineInput::default(),
                    completed: false,
                });
                form.field = form.field_count() - 1;
            }
        }
        (_, KeyCode::BackTab) => {
            form.field = form.field.checked_sub(1).unwrap_or(form.field_count() - 1);
        }
        (_, KeyCode::Up) => form.field = form.field.saturating_sub(1),
        (_, KeyCode::Down) => form.field = (form.field + 1).min(form.field_count() - 1),
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
            if form.field > 0 {
                let sub = &mut form.subtasks[form.field - 1];
                sub.completed = !sub.completed;
            }
        }
        (_, KeyCode::Backspace)
            if form.field > 0 && form.subtasks[form.field - 1].input.text.is_empty() =>
        {
            form.subtasks.remove(form.field - 1);
            form.field -= 1;
        }
        _ => {
            form.current_input_mut().handle_key(key);
        }
    }
}

/// Commit the form to the store. Blank task text keeps the form open.
fn save_task_form(app: &mut App) {
    let Some(form) = app.task_form.take() else {
        return;
    };
    if form.text.is_blank() {
        app.task_form = Some(form);
        app.set_status("Task text is required");
        return;
    }
    let subtasks = form.collect_subtasks();
    match form.task_id {
        Some(id) => {
            app.store.edit_task(id, &form.text.text, subtasks);
        }
        None => {
            if let Some(id) = app.store.add_task(&form.text.text, Some(form.status), subtasks) {
                app.focus_task(id);
            }
        }
    }
    app.status_message = None;
    app.mode = Mode::Navigate;
}

pub(super) fn handle_name_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.name_form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.name_form = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit_name_form(app),
        _ => {
            form.input.handle_key(key);
        }
    }
}

fn submit_name_form(app: &mut App) {
    let Some(form) = app.name_form.take() else {
        return;
    };
    let text = form.input.text.clone();
    let purpose = form.purpose;
    let accepted = match purpose {
        NamePurpose::NewBoard => match app.store.create_board(&text) {
            Some(_) => {
                app.focus = None;
                true
            }
            None => false,
        },
        NamePurpose::RenameBoard(id) => app.store.rename_board(id, &text),
        NamePurpose::ImportPath => {
            if form.input.is_blank() {
                false
            } else {
                app.import(&text);
                true
            }
        }
    };
    if accepted {
        app.mode = Mode::Navigate;
    } else {
        app.name_form = Some(form);
        app.set_status(match purpose {
            NamePurpose::ImportPath => "A file path is required",
            _ => "Board name is required",
        });
    }
}
