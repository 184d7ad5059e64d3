//! Entry routes - list, add, delete, edit, update

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{EntryIdForm, Flash, ListParams, NewEntryForm, UpdateEntryForm};
use crate::render;

/// GET / - List entries, optionally filtered by category
pub async fn list_entries(
    State(db): State<Database>,
    Query(params): Query<ListParams>,
) -> ServerResult<Html<String>> {
    let filter = params.category_filter();
    let entries = db.list_entries(filter)?;
    let categories = db.list_categories()?;

    Ok(Html(render::list_page(
        &entries,
        &categories,
        filter,
        params.flash(),
    )))
}

/// POST /add - Insert a new entry
pub async fn add_entry(
    State(db): State<Database>,
    Form(form): Form<NewEntryForm>,
) -> ServerResult<Redirect> {
    let id = db.insert_entry(&form.title, &form.text, &form.category)?;
    tracing::debug!(id, "entry added");

    Ok(redirect_with_flash(Flash::Posted))
}

/// POST /delete - Delete an entry; unknown ids are a silent no-op
pub async fn delete_entry(
    State(db): State<Database>,
    Form(form): Form<EntryIdForm>,
) -> ServerResult<Redirect> {
    if !db.delete_entry(form.id)? {
        tracing::debug!(id = form.id, "delete ignored, no such entry");
    }

    Ok(Redirect::to("/"))
}

/// POST /update - Render the edit form pre-filled with current values
pub async fn edit_entry(
    State(db): State<Database>,
    Form(form): Form<EntryIdForm>,
) -> ServerResult<Html<String>> {
    let entry = db
        .get_entry(form.id)?
        .ok_or_else(|| ServerError::NotFound(format!("Entry {} not found", form.id)))?;

    Ok(Html(render::edit_page(&entry)))
}

/// POST /submit_update - Overwrite an entry's fields; unknown ids no-op
pub async fn submit_update(
    State(db): State<Database>,
    Form(form): Form<UpdateEntryForm>,
) -> ServerResult<Redirect> {
    if !db.update_entry(form.id, &form.title, &form.text, &form.category)? {
        tracing::debug!(id = form.id, "update ignored, no such entry");
    }

    Ok(redirect_with_flash(Flash::Updated))
}

fn redirect_with_flash(flash: Flash) -> Redirect {
    Redirect::to(&format!("/?flash={}", flash.code()))
}
