use huddle_server::{InteractionKind, RoomId};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{
    CLEANUP_TIMEOUT_MS, expect_interaction, stays_quiet, wait_for_close, wait_for_users,
};

#[tokio::test]
async fn test_reconnect_evicts_previous() {
    init_tracing();

    let hub = create_test_hub();
    let room = RoomId::from("r1");

    let mut bob = hub.join("r1", "bob").await.expect("bob join");
    bob.skip_welcome().await.expect("bob welcome");

    let mut laptop = hub.join("r1", "alice").await.expect("alice join (laptop)");
    expect_interaction(&mut bob.conn, InteractionKind::NewPeer, "alice")
        .await
        .expect("bob sees alice");

    let mut phone = hub.join("r1", "alice").await.expect("alice join (phone)");
    phone.skip_welcome().await.expect("phone welcome");
    expect_interaction(&mut bob.conn, InteractionKind::NewPeer, "alice")
        .await
        .expect("bob sees alice again");

    // The laptop outbox holds its welcome, then closes.
    assert!(
        wait_for_close(&mut laptop.conn, CLEANUP_TIMEOUT_MS).await,
        "Previous connection should be closed"
    );
    assert_eq!(hub.center.users(&room).await, Some(2));

    // Ending the laptop session targets a connection that is already gone,
    // so alice stays in the room on the phone.
    laptop.leave();
    expect_interaction(&mut bob.conn, InteractionKind::Disconnected, "alice")
        .await
        .expect("stale session still announces");
    assert!(wait_for_users(&hub.center, &room, Some(2), CLEANUP_TIMEOUT_MS).await);

    hub.manager
        .send_message(
            &room,
            &bob.user,
            huddle_server::Interaction::NewOffer("to phone".into()),
        )
        .await
        .expect("send");
    expect_interaction(&mut phone.conn, InteractionKind::NewOffer, "to phone")
        .await
        .expect("phone receives");

    phone.leave();
    assert!(wait_for_users(&hub.center, &room, Some(1), CLEANUP_TIMEOUT_MS).await);
    expect_interaction(&mut bob.conn, InteractionKind::Disconnected, "alice")
        .await
        .expect("phone departure announced");
    assert!(stays_quiet(&mut bob.conn).await);
}
