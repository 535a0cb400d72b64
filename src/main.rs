#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::{path::PathBuf, sync::Arc};

#[cfg(feature = "std")]
use nfc_battleship::{
    init_logging, process_scan, render_empty_grid, render_grid, resolve_scan, status_line,
    transport::tcp::TcpTransport, BlobFormat, FileStore, GameConfig, GameSession, Reply, Request,
    Route, ScanClient, ScanServer, SessionHub,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about = "NFC tag driven Battleship on a 4x4 grid", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Directory holding the game state blob (default: $BATTLESHIP_STATE_DIR or .)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Format {
    Json,
    Bincode,
}

#[cfg(feature = "std")]
impl From<Format> for BlobFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => BlobFormat::Json,
            Format::Bincode => BlobFormat::Bincode,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Start a new game, replacing any game in progress.
    New {
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Fire at the cell of a scanned tag (e.g., 23 = row 2, column 3).
    Scan { hid: String },
    /// Handle a tag page visit: read `hid` from a URL or query string.
    Visit { url: String },
    /// Show the grid and the game counters.
    Show,
    /// Remove the stored game.
    Clear,
    /// Run the multi-session scan server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Talk to a running scan server.
    Remote {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, default_value = "default")]
        session: String,
        #[command(subcommand)]
        action: RemoteAction,
    },
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum RemoteAction {
    New,
    Scan { hid: String },
    Status,
    Clear,
}

#[cfg(feature = "std")]
fn state_dir(cli: &Cli) -> PathBuf {
    cli.state_dir
        .clone()
        .or_else(|| std::env::var_os("BATTLESHIP_STATE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            log::info!("Using fixed seed: {} (layout will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(feature = "std")]
fn print_route(route: Route) {
    println!("{} {}", route, route.path());
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let dir = state_dir(&cli);
    let format = BlobFormat::from(cli.format);
    let store = FileStore::new(&dir).with_format(format);
    let mut session = GameSession::new(store);

    match cli.command {
        Commands::New { seed } => {
            let mut rng = seeded_rng(seed);
            let state = session.new_game(&mut rng)?;
            println!("New game: {} ships on a {}x{} grid", state.ships().len(), state.grid_size(), state.grid_size());
            print!("{}", render_grid(&state));
        }
        Commands::Scan { hid } => {
            print_route(resolve_scan(&mut session, Some(hid.as_str())));
        }
        Commands::Visit { url } => {
            print_route(process_scan(&mut session, &url));
        }
        Commands::Show => match session.state()? {
            Some(state) => {
                print!("{}", render_grid(&state));
                println!("{}", status_line(&state.summary()));
            }
            None => {
                print!("{}", render_empty_grid(session.config().grid_size));
                println!("No game in progress; run `new` to start one");
            }
        },
        Commands::Clear => {
            session.clear()?;
            println!("Game cleared");
        }
        Commands::Serve { bind, seed } => {
            let hub = SessionHub::new(GameConfig::default(), seed, move |key| {
                FileStore::with_key(&dir, key).with_format(format)
            });
            let server = ScanServer::new(Arc::new(hub));
            let listener = TcpListener::bind(&bind).await?;
            server.listen(listener).await?;
        }
        Commands::Remote {
            connect,
            session: key,
            action,
        } => {
            let transport: TcpTransport<Request, Reply> = TcpTransport::connect(&connect).await?;
            let mut client = ScanClient::new(transport, key);
            match action {
                RemoteAction::New => {
                    let ships = client.new_game().await?;
                    println!("New game: {} ships", ships);
                }
                RemoteAction::Scan { hid } => print_route(client.scan(&hid).await?),
                RemoteAction::Status => match client.status().await? {
                    Some(summary) => println!("{}", status_line(&summary)),
                    None => println!("No game in progress"),
                },
                RemoteAction::Clear => {
                    client.clear().await?;
                    println!("Game cleared");
                }
            }
        }
    }
    Ok(())
}
