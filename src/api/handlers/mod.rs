use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;

use super::error::ApiError;
use super::validation::{validate_list_title, validate_title, TitleField};
use super::views::*;
use crate::session::{Session, SessionState};

// ============================================================
// Forms and path parsing
// ============================================================

#[derive(Debug, Deserialize)]
pub struct TodoListForm {
    #[serde(rename = "todoListTitle", default)]
    pub todo_list_title: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(rename = "todoTitle", default)]
    pub todo_title: String,
}

/// Ids arrive as raw path segments; anything that is not a number cannot name
/// an existing list or todo, so it is reported as not found.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Not found: {raw}")))
}

fn list_path(list_id: u64) -> String {
    format!("/lists/{list_id}")
}

fn flash_errors(state: &mut SessionState, errors: Vec<String>) {
    for error in errors {
        state.flash_error(error);
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Todo lists
// ============================================================

pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

pub async fn list_todo_lists(Extension(session): Extension<Session>) -> Json<ListsPage> {
    session.with(|state| {
        let flash = state.take_flash();
        Json(ListsPage::new(flash, state.todo_lists.lists()))
    })
}

pub async fn new_todo_list(Extension(session): Extension<Session>) -> Json<NewListPage> {
    Json(NewListPage {
        flash: session.with(SessionState::take_flash),
        todo_list_title: String::new(),
    })
}

pub async fn create_todo_list(
    Extension(session): Extension<Session>,
    Form(form): Form<TodoListForm>,
) -> Result<Response, ApiError> {
    session.with(|state| -> Result<Response, ApiError> {
        match validate_list_title(&form.todo_list_title, &state.todo_lists) {
            Ok(title) => {
                let list = state.todo_lists.create_list(title)?;
                tracing::debug!(list_id = list.id(), "Created todo list");
                state.flash_success("The todo list has been created.");
                Ok(Redirect::to("/lists").into_response())
            }
            Err(errors) => {
                flash_errors(state, errors);
                let page = NewListPage {
                    flash: state.take_flash(),
                    todo_list_title: form.todo_list_title,
                };
                Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
            }
        }
    })
}

pub async fn get_todo_list(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
) -> Result<Json<ListPage>, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Json<ListPage>, ApiError> {
        let list = state.todo_lists.list(list_id)?.clone();
        Ok(Json(ListPage::new(state.take_flash(), &list)))
    })
}

pub async fn edit_todo_list(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
) -> Result<Json<EditListPage>, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Json<EditListPage>, ApiError> {
        let todo_list = TodoListSummary::from(state.todo_lists.list(list_id)?);
        Ok(Json(EditListPage {
            flash: state.take_flash(),
            todo_list_title: todo_list.title.clone(),
            todo_list,
        }))
    })
}

pub async fn update_todo_list(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
    Form(form): Form<TodoListForm>,
) -> Result<Response, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Response, ApiError> {
        let todo_list = TodoListSummary::from(state.todo_lists.list(list_id)?);

        match validate_list_title(&form.todo_list_title, &state.todo_lists) {
            Ok(title) => {
                state.todo_lists.list_mut(list_id)?.set_title(title.as_str())?;
                state.flash_success(format!("Todo list title updated to \"{title}\""));
                Ok(Redirect::to(&list_path(list_id)).into_response())
            }
            Err(errors) => {
                flash_errors(state, errors);
                let page = EditListPage {
                    flash: state.take_flash(),
                    todo_list,
                    todo_list_title: form.todo_list_title,
                };
                Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
            }
        }
    })
}

pub async fn delete_todo_list(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Redirect, ApiError> {
        let removed = state.todo_lists.remove_list(list_id)?;
        state.flash_success(format!("Todo list \"{}\" was deleted", removed.title()));
        Ok(Redirect::to("/lists"))
    })
}

pub async fn complete_all_todos(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Redirect, ApiError> {
        state.todo_lists.list_mut(list_id)?.mark_all_done();
        state.flash_success("All todos have been marked \"done\"");
        Ok(Redirect::to(&list_path(list_id)))
    })
}

// ============================================================
// Todos
// ============================================================

pub async fn create_todo(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Response, ApiError> {
    let list_id = parse_id(&list_id)?;
    session.with(|state| -> Result<Response, ApiError> {
        // Unknown list wins over invalid input.
        state.todo_lists.list(list_id)?;

        match validate_title(&form.todo_title, TitleField::Todo) {
            Ok(title) => {
                let todo = state.todo_lists.create_todo(list_id, title.as_str())?;
                tracing::debug!(list_id, todo_id = todo.id(), "Created todo");
                state.flash_success(format!("{title} added to todos"));
                Ok(Redirect::to(&list_path(list_id)).into_response())
            }
            Err(errors) => {
                flash_errors(state, errors);
                let flash = state.take_flash();
                let mut page = ListPage::new(flash, state.todo_lists.list(list_id)?);
                page.todo_title = Some(form.todo_title);
                Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
            }
        }
    })
}

pub async fn toggle_todo(
    Extension(session): Extension<Session>,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    let (list_id, todo_id) = (parse_id(&list_id)?, parse_id(&todo_id)?);
    session.with(|state| -> Result<Redirect, ApiError> {
        let todo = state.todo_lists.todo_mut(list_id, todo_id)?;
        let message = if todo.toggle() {
            format!("{} has been marked done", todo.title())
        } else {
            format!("{} has been marked undone", todo.title())
        };
        state.flash_success(message);
        Ok(Redirect::to(&list_path(list_id)))
    })
}

pub async fn delete_todo(
    Extension(session): Extension<Session>,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    let (list_id, todo_id) = (parse_id(&list_id)?, parse_id(&todo_id)?);
    session.with(|state| -> Result<Redirect, ApiError> {
        let removed = state.todo_lists.remove_todo(list_id, todo_id)?;
        state.flash_success(format!("{} has been deleted", removed.title()));
        Ok(Redirect::to(&list_path(list_id)))
    })
}
