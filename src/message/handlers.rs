use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::MessageModel,
    types::{SendMessageRequest, SendMessageResponse},
};
use crate::session::CallerId;
use crate::shared::{AppError, AppState};

/// HTTP handler returning a room's history in arrival order
///
/// GET /api/chat/room/:room_id/messages
#[instrument(name = "list_room_messages", skip(state))]
pub async fn list_room_messages(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<MessageModel>>, AppError> {
    let messages = state.message_service.list_by_room(&room_id).await?;

    info!(room_id = %room_id, message_count = messages.len(), "Room messages listed");

    Ok(Json(messages))
}

/// HTTP handler sending a chat message through the broadcast gate
///
/// POST /api/chat/room/:room_id/messages
/// A restricted room silently drops non-owner messages (`delivered: false`)
#[instrument(name = "send_room_message", skip(state, request))]
pub async fn send_room_message(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    caller: CallerId,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let outcome = state
        .gate
        .handle_send(&room_id, caller.as_str(), request.content)
        .await?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::models::MessageKind;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route(
                "/room/:room_id/messages",
                get(list_room_messages).post(send_room_message),
            )
            .with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn send_request(room_id: &str, user: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/room/{}/messages", room_id))
            .header("X-User-Id", user)
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "content": content }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_then_list_messages() {
        let state = AppStateBuilder::new().build();
        let room = state.room_service.create_room("alice").await.unwrap();
        let app = app(state);

        let response = app
            .clone()
            .oneshot(send_request(&room.id, "bob", "hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let sent: SendMessageResponse = body_json(response).await;
        assert!(sent.delivered);

        let request = Request::builder()
            .uri(format!("/room/{}/messages", room.id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let messages: Vec<MessageModel> = body_json(response).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "bob");
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].kind, MessageKind::Chat);
    }

    #[tokio::test]
    async fn test_send_to_restricted_room_is_dropped() {
        let state = AppStateBuilder::new().build();
        let room = state.room_service.create_room("alice").await.unwrap();
        state
            .room_service
            .toggle_write_restriction(&room.id, "alice")
            .await
            .unwrap();
        let app = app(state.clone());

        let response = app
            .oneshot(send_request(&room.id, "bob", "let me in"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent: SendMessageResponse = body_json(response).await;
        assert!(!sent.delivered);
        assert!(sent.message.is_none());
        assert!(state
            .message_service
            .list_by_room(&room.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_send_to_unknown_room_is_404() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(send_request("missing", "bob", "anyone?"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_messages_of_empty_room() {
        let app = app(AppStateBuilder::new().build());

        let request = Request::builder()
            .uri("/room/emptyRoom/messages")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let messages: Vec<MessageModel> = body_json(response).await;
        assert!(messages.is_empty());
    }
}
