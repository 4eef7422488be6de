//! Per-connection handler: decode, dispatch, reply.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The loop is a plain request/response cycle — every frame
//! holds one [`Request`], every request produces exactly one
//! [`Response`], and the request's `seq` is echoed back so the client
//! can correlate replies.
//!
//! Component errors are translated into [`ErrorCode`]s here and only
//! here; the room and game crates never see protocol vocabulary.

use std::sync::Arc;

use mnemo_game::GameError;
use mnemo_lobby::RoomError;
use mnemo_protocol::{
    Codec, Envelope, ErrorCode, JsonCodec, Request, Response,
};

use crate::ServerError;
use crate::server::ServerState;
use crate::transport::WsConnection;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    mut conn: WsConnection,
    state: Arc<ServerState>,
) -> Result<(), ServerError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "client connected");

    let codec = JsonCodec;

    while let Some(data) = conn.recv().await? {
        let envelope: Envelope<Request> = match codec.decode(&data) {
            Ok(env) => env,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "undecodable frame");
                // No request seq to echo — the reply carries seq 0.
                let reply = Envelope {
                    seq: 0,
                    payload: Response::Error {
                        code: ErrorCode::BadRequest,
                        message: format!("invalid request: {e}"),
                    },
                };
                conn.send(&codec.encode(&reply)?).await?;
                continue;
            }
        };

        let payload = dispatch(&state, envelope.payload).await;

        let reply = Envelope {
            seq: envelope.seq,
            payload,
        };
        conn.send(&codec.encode(&reply)?).await?;
    }

    tracing::debug!(%conn_id, "client disconnected");
    Ok(())
}

/// Maps one request onto one component operation.
///
/// Each arm acquires exactly one component lock, holds it for the
/// duration of that operation only, and releases it before the caller
/// touches the network. No arm locks both components.
async fn dispatch(state: &ServerState, request: Request) -> Response {
    match request {
        Request::JoinRoom { player_id } => {
            let result = state.room.lock().await.join(player_id);
            match result {
                Ok(roster) => Response::RoomJoined {
                    other_players: roster.others,
                    me: roster.me,
                    max_players: roster.max_players,
                },
                Err(e) => room_error_response(e),
            }
        }

        Request::StartGame { player_ids } => {
            let sequence = state.game.lock().await.start(&player_ids);
            Response::GameStarted { sequence }
        }

        Request::SubmitAnswer {
            player_id,
            answer,
            timestamp,
        } => {
            let result =
                state.game.lock().await.submit(&player_id, &answer, timestamp);
            match result {
                Ok(sub) => Response::AnswerScored {
                    player_id: sub.player_id,
                    score: sub.score,
                },
                Err(e) => game_error_response(e),
            }
        }

        Request::GetGameState => match state.game.lock().await.state() {
            Ok(view) => Response::GameState {
                players: view.players,
                sequence: view.sequence,
            },
            Err(e) => game_error_response(e),
        },

        Request::ShowScores => match state.game.lock().await.scores() {
            Ok(scores) => Response::Scores { scores },
            Err(e) => game_error_response(e),
        },
    }
}

/// Translates a room error into its wire classification.
fn room_error_response(err: RoomError) -> Response {
    let code = match err {
        RoomError::Full { .. } => ErrorCode::ResourceExhausted,
    };
    Response::Error {
        code,
        message: err.to_string(),
    }
}

/// Translates a game error into its wire classification.
fn game_error_response(err: GameError) -> Response {
    let code = match err {
        GameError::NotStarted => ErrorCode::FailedPrecondition,
        GameError::UnknownPlayer(_) | GameError::NoSession => ErrorCode::NotFound,
    };
    Response::Error {
        code,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    //! Error-translation tests. The dispatch loop itself is exercised
    //! end-to-end in `tests/service.rs`.

    use super::*;
    use mnemo_protocol::PlayerId;

    #[test]
    fn test_room_full_maps_to_resource_exhausted() {
        let resp = room_error_response(RoomError::Full { max_players: 4 });
        assert!(matches!(
            resp,
            Response::Error {
                code: ErrorCode::ResourceExhausted,
                ..
            }
        ));
    }

    #[test]
    fn test_not_started_maps_to_failed_precondition() {
        let resp = game_error_response(GameError::NotStarted);
        assert!(matches!(
            resp,
            Response::Error {
                code: ErrorCode::FailedPrecondition,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_player_maps_to_not_found() {
        let resp =
            game_error_response(GameError::UnknownPlayer(PlayerId::new("x")));
        assert!(matches!(
            resp,
            Response::Error {
                code: ErrorCode::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_no_session_maps_to_not_found() {
        let resp = game_error_response(GameError::NoSession);
        assert!(matches!(
            resp,
            Response::Error {
                code: ErrorCode::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_error_response_carries_the_component_message() {
        let resp = game_error_response(GameError::NotStarted);
        match resp {
            Response::Error { message, .. } => {
                assert_eq!(message, "game has not started");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
