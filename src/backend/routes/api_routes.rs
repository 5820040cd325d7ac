/**
 * API Routes
 *
 * ## Accounts
 * - `POST /users/register` - public
 * - `POST /users/login` - public
 * - `GET|PUT|DELETE /users/profile` - authenticated
 *
 * ## Boards (all authenticated)
 * - `POST|GET /boards`
 * - `GET|PUT|DELETE /boards/{boardId}`
 * - `POST|GET|PUT /boards/{boardId}/columns` (PUT rewrites the column order)
 * - `GET|PUT|DELETE /boards/{boardId}/columns/{columnId}`
 * - `POST|GET /boards/{boardId}/columns/{columnId}/tasks`
 * - `PUT /boards/{boardId}/columns/{columnId}/tasks/order`
 * - `GET|PUT|DELETE /boards/{boardId}/columns/{columnId}/tasks/{taskId}`
 * - `PUT /boards/{boardId}/tasks/{taskId}/move`
 */
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::handlers::{delete_profile, get_profile, login, register, update_profile};
use crate::backend::board::handlers::{
    create_board, create_column, create_task, delete_board, delete_column, delete_task, get_board,
    get_column, get_task, list_boards, list_columns, list_tasks, move_task, reorder_columns,
    reorder_tasks, update_board, update_column, update_task,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure account and board routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/users/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/boards", post(create_board).get(list_boards))
        .route(
            "/boards/{boardId}",
            get(get_board).put(update_board).delete(delete_board),
        )
        .route(
            "/boards/{boardId}/columns",
            post(create_column).get(list_columns).put(reorder_columns),
        )
        .route(
            "/boards/{boardId}/columns/{columnId}",
            get(get_column).put(update_column).delete(delete_column),
        )
        .route(
            "/boards/{boardId}/columns/{columnId}/tasks",
            post(create_task).get(list_tasks),
        )
        .route(
            "/boards/{boardId}/columns/{columnId}/tasks/order",
            put(reorder_tasks),
        )
        .route(
            "/boards/{boardId}/columns/{columnId}/tasks/{taskId}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/boards/{boardId}/tasks/{taskId}/move", put(move_task))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .merge(protected)
}
