use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tokio::sync::mpsc;

use liveact_core::ActivityKind;
use liveact_daemon::analytics::LoggingAnalytics;
use liveact_daemon::controller::LiveActivityController;
use liveact_daemon::dismissal::TokioDismissalScheduler;
use liveact_daemon::id::AtomicIdAllocator;
use liveact_daemon::platform::InMemoryNotifications;
use liveact_daemon::receiver::{EventHandler, PushReceiver};
use liveact_daemon::remote::LoggingRegistration;
use liveact_daemon::source::PushSource;
use liveact_daemon::status::format_status;
use liveact_daemon::store::ContentStateStore;

/// Default directory for the runtime socket and database.
const DEFAULT_RUNTIME_DIR: &str = "/tmp/liveact";
const DEFAULT_PUSH_SOCKET: &str = "/tmp/liveact/push.sock";
const DEFAULT_DB: &str = "/tmp/liveact/state.db";

#[derive(Parser)]
#[command(name = "liveact", about = "Live activity notification synchronization daemon")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon (default when no subcommand given)
    Daemon {
        /// Unix socket receiving push events as newline-delimited JSON
        #[arg(long, default_value = DEFAULT_PUSH_SOCKET)]
        socket: String,

        /// Content state database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Show the current live activity records (one-shot)
    Status {
        /// Content state database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Write one raw JSON push event line to the daemon socket
    Send {
        /// Push socket path
        #[arg(long, default_value = DEFAULT_PUSH_SOCKET)]
        socket: String,

        /// The event JSON, e.g. '{"type":"subscription-changed"}'
        event: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing. Respects RUST_LOG env var, defaults to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_daemon(DEFAULT_PUSH_SOCKET.to_string(), DEFAULT_DB.to_string()).await?,
        Some(Commands::Daemon { socket, db }) => run_daemon(socket, db).await?,
        Some(Commands::Status { db }) => run_status(Path::new(&db))?,
        Some(Commands::Send { socket, event }) => run_send(&socket, &event).await?,
    }

    Ok(())
}

async fn run_daemon(socket: String, db: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(socket = %socket, db = %db, "starting liveact daemon");

    std::fs::create_dir_all(DEFAULT_RUNTIME_DIR)?;

    // Push events flow: source -> channel -> receiver -> controller.
    let (push_tx, push_rx) = mpsc::channel(256);

    let store = Arc::new(ContentStateStore::open(Path::new(&db))?);

    let controller = Arc::new(LiveActivityController::new(
        Arc::clone(&store),
        Arc::new(InMemoryNotifications::default()),
        Arc::new(LoggingRegistration),
        Arc::new(LoggingAnalytics),
        Arc::new(AtomicIdAllocator::default()),
    ));

    let scheduler = Arc::new(TokioDismissalScheduler::new(Arc::clone(&controller)));
    let handler = Arc::new(EventHandler::new(Arc::clone(&controller), scheduler));
    let mut receiver = PushReceiver::new(handler, push_rx);

    let source = PushSource::new(push_tx, PathBuf::from(&socket));

    // Log every store write so state transitions are visible in the daemon
    // output, including the null writes on final updates.
    let mut changes = store.subscribe();
    let change_logger = async move {
        while let Ok(change) = changes.recv().await {
            tracing::info!(
                kind = %change.kind,
                active = change.state.is_some(),
                "content state changed"
            );
        }
    };

    tokio::select! {
        result = source.run() => {
            match result {
                Ok(()) => tracing::warn!("push source exited unexpectedly"),
                Err(e) => tracing::warn!("push source error: {e}"),
            }
        }
        _ = receiver.run() => {
            tracing::warn!("push receiver exited unexpectedly");
        }
        _ = change_logger => {
            tracing::warn!("change logger exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl-c, shutting down");
        }
    }

    // Cleanup: remove the socket file.
    let socket_path = PathBuf::from(&socket);
    if socket_path.exists() {
        if let Err(e) = std::fs::remove_file(&socket_path) {
            tracing::warn!(path = %socket_path.display(), "failed to remove socket file: {e}");
        }
    }

    tracing::info!("liveact daemon stopped");
    Ok(())
}

/// Read the store and print one line per activity kind.
fn run_status(db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = ContentStateStore::open(db)?;

    let mut records = Vec::new();
    for kind in ActivityKind::ALL {
        records.push((kind, store.read(kind)?));
    }

    print!("{}", format_status(&records));
    Ok(())
}

/// Write one raw event line to the push socket. Manual testing aid.
async fn run_send(socket: &str, event: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = UnixStream::connect(socket).await.map_err(|e| {
        eprintln!("Failed to connect to daemon at {socket}: {e}");
        eprintln!("Is the daemon running? Start it with: liveact daemon");
        e
    })?;

    stream.write_all(event.as_bytes()).await?;
    stream.write_all(b"\n").await?;
    stream.shutdown().await?;
    Ok(())
}
