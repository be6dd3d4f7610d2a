use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskQuery, TaskUpdate},
    repository::TaskRepository,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Only tasks owned by the caller are ever returned. Results come back in
/// creation order.
///
/// ## Query Parameters:
/// - `completed` (optional): restrict to tasks whose completion flag matches.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_tasks(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = repo.list(user.user_id, query_params.completed).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the authenticated caller; any owner field a client
/// smuggles into the body is ignored.
///
/// ## Request Body:
/// - `description`: what the task is about (required, non-empty).
/// - `completed` (optional): completion flag, defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If the description is empty.
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_task(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = repo.create(user.user_id, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON if found and owned by the caller.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task with the given ID exists for the caller.
///   Someone else's task produces exactly this response.
#[get("/{id}")]
pub async fn get_task(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = repo.find(user.user_id, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates an existing task.
///
/// Partial update: only the fields present in the body are applied, the rest
/// keep their stored values.
///
/// ## Request Body:
/// - `description` (optional): replacement description, non-empty.
/// - `completed` (optional): replacement completion flag.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task with the given ID exists for the caller.
/// - `422 Unprocessable Entity`: If a provided description is empty.
#[put("/{id}")]
pub async fn update_task(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = repo
        .update(user.user_id, task_id.into_inner(), &task_data)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Sets a task's completion status.
///
/// Unlike the general update, this endpoint requires `completed` to be
/// supplied explicitly. The existence check runs first, so an unknown or
/// foreign task id yields `404` even when the body is also missing the flag.
///
/// ## Request Body:
/// - `completed`: the new completion flag (required).
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If `completed` is absent from the body.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task with the given ID exists for the caller.
#[patch("/{id}/complete")]
pub async fn complete_task(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task_id = task_id.into_inner();
    repo.find(user.user_id, task_id).await?;

    let completed = task_data
        .completed
        .ok_or_else(|| AppError::BadRequest("completed field is required".into()))?;

    let task = repo.set_completed(user.user_id, task_id, completed).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no task with the given ID exists for the caller.
#[delete("/{id}")]
pub async fn delete_task(
    repo: web::Data<TaskRepository>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    repo.delete(user.user_id, task_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
