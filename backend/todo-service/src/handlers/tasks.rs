/// Task CRUD handlers
///
/// Every handler runs behind `JwtAuthMiddleware`; the `UserId` extractor
/// yields the caller and all store calls are scoped to it. A task owned by
/// someone else answers exactly like a missing one.
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::{CreateTaskRequest, PatchTaskRequest, TaskChanges, UpdateTaskRequest},
    AppState,
};

pub async fn create_task(
    state: web::Data<AppState>,
    user_id: UserId,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let task = state
        .tasks
        .create_task(user_id.0, &payload.task_name, payload.description.as_deref())
        .await?;

    tracing::debug!(user_id = user_id.0, task_id = task.id, "task created");
    Ok(HttpResponse::Created().json(task))
}

pub async fn list_tasks(
    state: web::Data<AppState>,
    user_id: UserId,
) -> Result<HttpResponse, AppError> {
    let tasks = state.tasks.list_tasks(user_id.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn get_task(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let task = state
        .tasks
        .get_task(user_id.0, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<i64>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    apply_changes(&state, user_id, path.into_inner(), payload.into_inner().into()).await
}

pub async fn patch_task(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<i64>,
    payload: web::Json<PatchTaskRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    apply_changes(&state, user_id, path.into_inner(), payload.into_inner().into()).await
}

async fn apply_changes(
    state: &AppState,
    user_id: UserId,
    task_id: i64,
    changes: TaskChanges,
) -> Result<HttpResponse, AppError> {
    let task = state
        .tasks
        .update_task(user_id.0, task_id, changes)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let task_id = path.into_inner();
    if !state.tasks.delete_task(user_id.0, task_id).await? {
        return Err(AppError::NotFound);
    }

    tracing::debug!(user_id = user_id.0, task_id, "task deleted");
    Ok(HttpResponse::NoContent().finish())
}
