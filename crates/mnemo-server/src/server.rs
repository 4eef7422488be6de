//! `Server` builder and accept loop.
//!
//! This is the composition root: it owns the two state components, each
//! behind its own mutex, and hands a shared reference to every
//! connection-handler task.

use std::sync::Arc;

use mnemo_game::{GameConfig, GameSession};
use mnemo_lobby::{Room, RoomConfig};
use tokio::sync::Mutex;

use crate::ServerError;
use crate::handler::handle_connection;
use crate::transport::WsListener;

/// Shared server state passed to each connection handler task.
///
/// One exclusive lock per component, nothing finer: every operation
/// acquires its component's lock for the operation's full duration and
/// never suspends while holding it. The two locks are never held at the
/// same time, so no ordering discipline is needed.
pub(crate) struct ServerState {
    pub(crate) room: Mutex<Room>,
    pub(crate) game: Mutex<GameSession>,
}

/// Builder for configuring and starting a Mnemo server.
///
/// # Example
///
/// ```rust,no_run
/// use mnemo_server::ServerBuilder;
///
/// # async fn run() -> Result<(), mnemo_server::ServerError> {
/// let server = ServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct ServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
    game_config: GameConfig,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            room_config: RoomConfig::default(),
            game_config: GameConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the room configuration (capacity).
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Sets the game configuration (sequence length).
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Binds the listen socket and builds the server.
    ///
    /// The room and game session are created here, once, with their
    /// boot-time configuration; they live exactly as long as the
    /// process.
    pub async fn build(self) -> Result<Server, ServerError> {
        let listener = WsListener::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            room: Mutex::new(Room::new(self.room_config)),
            game: Mutex::new(GameSession::new(self.game_config)),
        });

        Ok(Server { listener, state })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Mnemo server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct Server {
    listener: WsListener,
    state: Arc<ServerState>,
}

impl Server {
    /// Creates a new builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("mnemo server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
