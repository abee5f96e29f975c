use huddle_server::{Interaction, InteractionKind, RoomId};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{expect_interaction, stays_quiet};

#[tokio::test]
async fn test_offer_reaches_every_other_peer_once() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::from("r1");

    let mut alice = hub.join("r1", "alice").await.expect("alice join");
    let mut bob = hub.join("r1", "bob").await.expect("bob join");
    let mut carol = hub.join("r1", "carol").await.expect("carol join");

    alice.skip_welcome().await.unwrap();
    expect_interaction(&mut alice.conn, InteractionKind::NewPeer, "bob")
        .await
        .unwrap();
    expect_interaction(&mut alice.conn, InteractionKind::NewPeer, "carol")
        .await
        .unwrap();
    bob.skip_welcome().await.unwrap();
    expect_interaction(&mut bob.conn, InteractionKind::NewPeer, "carol")
        .await
        .unwrap();
    carol.skip_welcome().await.unwrap();

    let descriptor = hub
        .manager
        .send_message(&room, &alice.user, Interaction::NewOffer("sdp-blob".into()))
        .await
        .expect("send_message");
    assert_eq!(descriptor.id, room);

    expect_interaction(&mut bob.conn, InteractionKind::NewOffer, "sdp-blob")
        .await
        .unwrap();
    expect_interaction(&mut carol.conn, InteractionKind::NewOffer, "sdp-blob")
        .await
        .unwrap();

    assert!(stays_quiet(&mut alice.conn).await, "sender must be excluded");
    assert!(stays_quiet(&mut bob.conn).await, "delivered exactly once");
    assert!(stays_quiet(&mut carol.conn).await, "delivered exactly once");

    // ICE candidates flow the same way.
    hub.manager
        .send_message(
            &room,
            &bob.user,
            Interaction::NewIceCandidate("candidate:1".into()),
        )
        .await
        .unwrap();
    expect_interaction(&mut alice.conn, InteractionKind::NewIceCandidate, "candidate:1")
        .await
        .unwrap();
    expect_interaction(&mut carol.conn, InteractionKind::NewIceCandidate, "candidate:1")
        .await
        .unwrap();
    assert!(stays_quiet(&mut bob.conn).await);
}

#[tokio::test]
async fn test_message_to_unknown_room_is_noop() {
    init_tracing();

    let hub = create_test_hub();
    let mut alice = hub.join("r1", "alice").await.unwrap();
    alice.skip_welcome().await.unwrap();

    let ghost = RoomId::from("ghost");
    let descriptor = hub
        .manager
        .send_message(&ghost, &alice.user, Interaction::NewAnswer("x".into()))
        .await
        .expect("unknown room is not an error");

    assert_eq!(descriptor.id, ghost);
    assert!(!hub.center.contains(&ghost).await);
    assert!(stays_quiet(&mut alice.conn).await);
}
