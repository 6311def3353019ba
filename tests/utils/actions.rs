//! Test action helpers - drive the router and socket handler like a client
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt; // for `oneshot`

use roomchat::{
    message::{MessageModel, SendMessageResponse},
    room::RoomResponse,
    session::{ChatSession, USER_ID_HEADER},
    websockets::{HandlerResponse, MessageHandler},
};

use super::setup::TestSetup;

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

impl TestSetup {
    async fn call(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_room(&self, owner_id: &str) -> RoomResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat/room")
            .header(USER_ID_HEADER, owner_id)
            .body(Body::empty())
            .unwrap();

        let response = self.call(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    pub async fn get_room(&self, room_id: &str) -> Response {
        let request = Request::builder()
            .uri(format!("/api/chat/room/{}", room_id))
            .body(Body::empty())
            .unwrap();

        self.call(request).await
    }

    pub async fn toggle_write(&self, room_id: &str, caller_id: &str) -> Response {
        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/chat/room/{}/toggleWrite", room_id))
            .header(USER_ID_HEADER, caller_id)
            .body(Body::empty())
            .unwrap();

        self.call(request).await
    }

    pub async fn send_http(&self, room_id: &str, sender_id: &str, content: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/chat/room/{}/messages", room_id))
            .header(USER_ID_HEADER, sender_id)
            .header("content-type", "application/json")
            .body(Body::from(json!({ "content": content }).to_string()))
            .unwrap();

        self.call(request).await
    }

    pub async fn send_chat(&self, room_id: &str, sender_id: &str, content: &str) -> SendMessageResponse {
        let response = self.send_http(room_id, sender_id, content).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    pub async fn list_messages(&self, room_id: &str) -> Vec<MessageModel> {
        let request = Request::builder()
            .uri(format!("/api/chat/room/{}/messages", room_id))
            .body(Body::empty())
            .unwrap();

        let response = self.call(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    /// Feeds a raw client frame to the socket handler as `user_id`
    pub async fn send_frame(&self, room_id: &str, user_id: &str, frame: &str) -> HandlerResponse {
        let session = ChatSession::new(user_id, room_id);
        self.input_handler
            .handle_message(&session, frame.to_string())
            .await
    }
}
