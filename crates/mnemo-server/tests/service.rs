//! End-to-end tests driving the full WebSocket request/response loop.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use mnemo_lobby::RoomConfig;
use mnemo_protocol::{Card, Envelope, ErrorCode, PlayerId, Request, Response};
use mnemo_server::ServerBuilder;
use tokio_tungstenite::tungstenite::Message;

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

// =========================================================================
// Harness
// =========================================================================

async fn start_with(room: RoomConfig) -> String {
    let server = ServerBuilder::new()
        .bind("127.0.0.1:0")
        .room_config(room)
        .build()
        .await
        .unwrap();
    let addr = server.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn start() -> String {
    start_with(RoomConfig::default()).await
}

async fn ws(addr: &str) -> Ws {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .unwrap();
    ws
}

fn enc(env: &Envelope<Request>) -> Message {
    Message::Binary(serde_json::to_vec(env).unwrap().into())
}

fn dec(msg: Message) -> Envelope<Response> {
    serde_json::from_slice(&msg.into_data()).unwrap()
}

async fn recv(ws: &mut Ws) -> Envelope<Response> {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timeout")
        .unwrap()
        .unwrap();
    dec(msg)
}

/// Sends one request and waits for its reply, checking the seq echo.
async fn call(ws: &mut Ws, seq: u64, payload: Request) -> Response {
    ws.send(enc(&Envelope { seq, payload })).await.unwrap();
    let reply = recv(ws).await;
    assert_eq!(reply.seq, seq, "reply must echo the request seq");
    reply.payload
}

fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}

/// Returns `answer` with one position replaced by a different card.
fn perturb(answer: &[Card]) -> Vec<Card> {
    let mut wrong = answer.to_vec();
    wrong[0] = Card::ALL
        .iter()
        .copied()
        .find(|c| *c != wrong[0])
        .unwrap();
    wrong
}

// =========================================================================
// Room membership
// =========================================================================

#[tokio::test]
async fn test_join_room_caps_membership() {
    let addr = start_with(RoomConfig { max_players: 2 }).await;
    let mut a = ws(&addr).await;
    let mut b = ws(&addr).await;
    let mut c = ws(&addr).await;

    // First member sees an empty roster.
    match call(&mut a, 1, Request::JoinRoom { player_id: pid("a") }).await {
        Response::RoomJoined {
            other_players,
            me,
            max_players,
        } => {
            assert!(other_players.is_empty());
            assert_eq!(me.id, pid("a"));
            assert_eq!(max_players, 2);
        }
        other => panic!("expected RoomJoined, got {other:?}"),
    }

    // Second member sees the first.
    match call(&mut b, 1, Request::JoinRoom { player_id: pid("b") }).await {
        Response::RoomJoined { other_players, .. } => {
            assert_eq!(other_players.len(), 1);
            assert_eq!(other_players[0].id, pid("a"));
        }
        other => panic!("expected RoomJoined, got {other:?}"),
    }

    // Third distinct member is turned away.
    match call(&mut c, 1, Request::JoinRoom { player_id: pid("c") }).await {
        Response::Error { code, .. } => {
            assert_eq!(code, ErrorCode::ResourceExhausted);
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejoin_is_idempotent() {
    let addr = start_with(RoomConfig { max_players: 2 }).await;
    let mut a = ws(&addr).await;
    let mut b = ws(&addr).await;

    call(&mut a, 1, Request::JoinRoom { player_id: pid("a") }).await;
    call(&mut b, 1, Request::JoinRoom { player_id: pid("b") }).await;

    // The room is now full, but a member re-joining must still succeed.
    match call(&mut a, 2, Request::JoinRoom { player_id: pid("a") }).await {
        Response::RoomJoined { other_players, .. } => {
            assert_eq!(other_players.len(), 1);
            assert_eq!(other_players[0].id, pid("b"));
        }
        other => panic!("expected RoomJoined, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_joins_never_exceed_capacity() {
    // Eight clients race for four slots; exactly four must win.
    let addr = start().await; // default capacity 4

    let mut tasks = Vec::new();
    for i in 0..8 {
        let addr = addr.clone();
        tasks.push(tokio::spawn(async move {
            let mut conn = ws(&addr).await;
            call(
                &mut conn,
                1,
                Request::JoinRoom {
                    player_id: pid(&format!("p{i}")),
                },
            )
            .await
        }));
    }

    let mut joined = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Response::RoomJoined { .. } => joined += 1,
            Response::Error {
                code: ErrorCode::ResourceExhausted,
                ..
            } => rejected += 1,
            other => panic!("unexpected response {other:?}"),
        }
    }

    assert_eq!(joined, 4);
    assert_eq!(rejected, 4);
}

// =========================================================================
// Full round
// =========================================================================

// Full walkthrough: capacity 2, "a" and "b" join, a round starts,
// "a" recalls perfectly at timestamp 3 (scores 30), "b" misses at
// timestamp 5 (scores 0).
#[tokio::test]
async fn test_full_round_scenario() {
    let addr = start_with(RoomConfig { max_players: 2 }).await;
    let mut a = ws(&addr).await;
    let mut b = ws(&addr).await;

    call(&mut a, 1, Request::JoinRoom { player_id: pid("a") }).await;
    call(&mut b, 1, Request::JoinRoom { player_id: pid("b") }).await;

    // Host starts the round; the reply carries the sequence to relay.
    let sequence = match call(
        &mut a,
        2,
        Request::StartGame {
            player_ids: vec![pid("a"), pid("b")],
        },
    )
    .await
    {
        Response::GameStarted { sequence } => {
            assert_eq!(sequence.len(), 5);
            sequence
        }
        other => panic!("expected GameStarted, got {other:?}"),
    };

    // "a" recalls the exact sequence.
    match call(
        &mut a,
        3,
        Request::SubmitAnswer {
            player_id: pid("a"),
            answer: sequence.clone(),
            timestamp: 3,
        },
    )
    .await
    {
        Response::AnswerScored { player_id, score } => {
            assert_eq!(player_id, pid("a"));
            assert_eq!(score, 30);
        }
        other => panic!("expected AnswerScored, got {other:?}"),
    }

    // "b" gets one card wrong.
    match call(
        &mut b,
        2,
        Request::SubmitAnswer {
            player_id: pid("b"),
            answer: perturb(&sequence),
            timestamp: 5,
        },
    )
    .await
    {
        Response::AnswerScored { player_id, score } => {
            assert_eq!(player_id, pid("b"));
            assert_eq!(score, 0);
        }
        other => panic!("expected AnswerScored, got {other:?}"),
    }

    // Anyone can read the scoreboard.
    match call(&mut b, 3, Request::ShowScores).await {
        Response::Scores { mut scores } => {
            scores.sort_by(|x, y| {
                x.player_id.as_str().cmp(y.player_id.as_str())
            });
            assert_eq!(scores.len(), 2);
            assert_eq!(scores[0].player_id, pid("a"));
            assert_eq!(scores[0].score, 30);
            assert_eq!(scores[1].player_id, pid("b"));
            assert_eq!(scores[1].score, 0);
        }
        other => panic!("expected Scores, got {other:?}"),
    }
}

#[tokio::test]
async fn test_state_reveals_live_sequence() {
    let addr = start().await;
    let mut conn = ws(&addr).await;

    let sequence = match call(
        &mut conn,
        1,
        Request::StartGame {
            player_ids: vec![pid("a"), pid("b")],
        },
    )
    .await
    {
        Response::GameStarted { sequence } => sequence,
        other => panic!("expected GameStarted, got {other:?}"),
    };

    match call(&mut conn, 2, Request::GetGameState).await {
        Response::GameState {
            mut players,
            sequence: live,
        } => {
            players.sort_by(|x, y| x.as_str().cmp(y.as_str()));
            assert_eq!(players, vec![pid("a"), pid("b")]);
            // The snapshot exposes the round's answer.
            assert_eq!(live, sequence);
        }
        other => panic!("expected GameState, got {other:?}"),
    }
}

#[tokio::test]
async fn test_restart_resets_scores() {
    let addr = start().await;
    let mut conn = ws(&addr).await;

    let sequence = match call(
        &mut conn,
        1,
        Request::StartGame {
            player_ids: vec![pid("a")],
        },
    )
    .await
    {
        Response::GameStarted { sequence } => sequence,
        other => panic!("expected GameStarted, got {other:?}"),
    };

    call(
        &mut conn,
        2,
        Request::SubmitAnswer {
            player_id: pid("a"),
            answer: sequence,
            timestamp: 2,
        },
    )
    .await;

    // Starting again wipes the previous round's scores.
    call(
        &mut conn,
        3,
        Request::StartGame {
            player_ids: vec![pid("a")],
        },
    )
    .await;

    match call(&mut conn, 4, Request::ShowScores).await {
        Response::Scores { scores } => {
            assert_eq!(scores.len(), 1);
            assert_eq!(scores[0].score, 0);
        }
        other => panic!("expected Scores, got {other:?}"),
    }
}

// =========================================================================
// Failure classification
// =========================================================================

#[tokio::test]
async fn test_queries_before_any_round_fail() {
    let addr = start().await;
    let mut conn = ws(&addr).await;

    match call(
        &mut conn,
        1,
        Request::SubmitAnswer {
            player_id: pid("a"),
            answer: vec![Card::Sun],
            timestamp: 1,
        },
    )
    .await
    {
        Response::Error { code, .. } => {
            assert_eq!(code, ErrorCode::FailedPrecondition);
        }
        other => panic!("expected Error, got {other:?}"),
    }

    match call(&mut conn, 2, Request::GetGameState).await {
        Response::Error { code, .. } => assert_eq!(code, ErrorCode::NotFound),
        other => panic!("expected Error, got {other:?}"),
    }

    match call(&mut conn, 3, Request::ShowScores).await {
        Response::Error { code, .. } => assert_eq!(code, ErrorCode::NotFound),
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_from_outsider_returns_not_found() {
    let addr = start().await;
    let mut conn = ws(&addr).await;

    let sequence = match call(
        &mut conn,
        1,
        Request::StartGame {
            player_ids: vec![pid("a")],
        },
    )
    .await
    {
        Response::GameStarted { sequence } => sequence,
        other => panic!("expected GameStarted, got {other:?}"),
    };

    match call(
        &mut conn,
        2,
        Request::SubmitAnswer {
            player_id: pid("ghost"),
            answer: sequence,
            timestamp: 1,
        },
    )
    .await
    {
        Response::Error { code, .. } => assert_eq!(code, ErrorCode::NotFound),
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_frame_returns_bad_request_with_seq_zero() {
    let addr = start().await;
    let mut conn = ws(&addr).await;

    conn.send(Message::Binary(b"not an envelope".to_vec().into()))
        .await
        .unwrap();

    let reply = recv(&mut conn).await;
    assert_eq!(reply.seq, 0);
    match reply.payload {
        Response::Error { code, .. } => {
            assert_eq!(code, ErrorCode::BadRequest);
        }
        other => panic!("expected Error, got {other:?}"),
    }

    // The connection survives a bad frame; a valid request still works.
    match call(&mut conn, 1, Request::GetGameState).await {
        Response::Error { code, .. } => assert_eq!(code, ErrorCode::NotFound),
        other => panic!("expected Error, got {other:?}"),
    }
}
