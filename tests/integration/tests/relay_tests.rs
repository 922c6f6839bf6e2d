//! End-to-end tests driving the real HTTP stack with the client facade

use integration_tests::TestServer;
use relay_client::{ChatClient, ClientConfig, OutgoingMessage};
use relay_common::RateLimitConfig;

#[tokio::test]
async fn test_client_posts_and_lists_through_relay() {
    let server = TestServer::start().await.unwrap();
    let client = ChatClient::new(ClientConfig::new(vec![server.messages_url()]));

    client.init().await;
    assert!(client.is_healthy());
    assert!(client.messages().is_empty());

    let sent = client
        .add_message(&OutgoingMessage {
            author: Some("sess-1".to_string()),
            name: Some("dj &&& Central High".to_string()),
            school: Some("{\"like\":0,\"heart\":0}".to_string()),
            avatar: None,
            text: "first song request".to_string(),
            kind: Some("request".to_string()),
        })
        .await;
    assert!(sent);

    let messages = client.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "first song request");
    assert_eq!(messages[0].kind, "request");
    assert_eq!(messages[0].name, "dj &&& Central High");
    assert_eq!(server.repo.len(), 1);
}

#[tokio::test]
async fn test_client_reaction_roundtrip() {
    let server = TestServer::start().await.unwrap();
    let client = ChatClient::new(ClientConfig::new(vec![server.messages_url()]));
    client.init().await;

    client
        .add_message(&OutgoingMessage {
            text: "react to me".to_string(),
            school: Some("3".to_string()),
            ..Default::default()
        })
        .await;

    let id = client.messages()[0].id.to_string();
    assert!(client.react(&id, "heart").await);

    // Legacy bare-integer counter decoded as like-only, heart added on top
    let messages = client.messages();
    assert_eq!(
        messages[0].reactions.as_deref(),
        Some("{\"like\":3,\"heart\":1}")
    );
}

#[tokio::test]
async fn test_rate_limit_surfaces_as_failed_send() {
    let server = TestServer::start_with_rate_limit(RateLimitConfig {
        window_ms: 60_000,
        max_post: 2,
        max_patch: 30,
    })
    .await
    .unwrap();
    let client = ChatClient::new(ClientConfig::new(vec![server.messages_url()]));
    client.init().await;

    for i in 0..2 {
        let sent = client
            .add_message(&OutgoingMessage {
                text: format!("msg {i}"),
                ..Default::default()
            })
            .await;
        assert!(sent);
    }

    let sent = client
        .add_message(&OutgoingMessage {
            text: "over quota".to_string(),
            ..Default::default()
        })
        .await;
    assert!(!sent);
    assert!(client.status().last_error.is_some());
    // The rejected message never reached the store
    assert_eq!(server.repo.len(), 2);
}

#[tokio::test]
async fn test_truncation_applies_across_the_wire() {
    let server = TestServer::start().await.unwrap();
    let client = ChatClient::new(ClientConfig::new(vec![server.messages_url()]));
    client.init().await;

    let sent = client
        .add_message(&OutgoingMessage {
            name: Some("n".repeat(300)),
            text: "t".repeat(500),
            ..Default::default()
        })
        .await;
    assert!(sent);

    let messages = client.messages();
    assert_eq!(messages[0].name.len(), 140);
    assert_eq!(messages[0].text.len(), 240);
}

#[tokio::test]
async fn test_unreachable_relay_degrades_client() {
    // Nothing listens on this port; bind-then-drop reserves a dead address
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}/messages", listener.local_addr().unwrap());
    drop(listener);

    let client = ChatClient::new(ClientConfig::new(vec![dead]));
    client.init().await;

    assert!(!client.is_healthy());
    assert!(client.status().last_error.is_some());
    assert!(
        !client
            .add_message(&OutgoingMessage {
                text: "into the void".to_string(),
                ..Default::default()
            })
            .await
    );
}
