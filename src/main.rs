#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use animal_chess::{
    init_logging, player::cli::print_game, AiPlayer, CliPlayer, Difficulty, GameEvent,
    GameSession, Phase, Player, PlayerNode, TcpTransport,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play on the local machine, human or AI on either side.
    Local {
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        first: PlayerType,
        #[arg(long, value_enum, default_value_t = PlayerType::Ai)]
        second: PlayerType,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Host a networked game as the first player and wait for a client.
    TcpServer {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Join a networked game hosted by a server, as the second player.
    TcpClient {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn make_player(kind: PlayerType, difficulty: Difficulty) -> Box<dyn Player> {
    match kind {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => Box::new(AiPlayer::new(difficulty)),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            first,
            second,
            difficulty,
            seed,
        } => {
            let mut rng = make_rng(seed);
            let players = [make_player(first, difficulty), make_player(second, difficulty)];
            run_local(players, &mut rng)?;
        }
        Commands::TcpServer {
            bind,
            player,
            difficulty,
            seed,
        } => {
            println!("Starting TCP server at {}...", bind);
            let mut rng = make_rng(seed);
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a player to connect...");
            let (stream, addr) = listener.accept().await?;
            stream.set_nodelay(true)?;
            println!("Player connected from {}", addr);

            let transport = Box::new(TcpTransport::new(stream));
            let mut node = PlayerNode::new(make_player(player, difficulty), GameSession::new(), transport);
            match node.run(&mut rng, true).await {
                Ok(()) => report(&node),
                Err(e) => eprintln!("Game ended with an error: {}", e),
            }
        }
        Commands::TcpClient {
            connect,
            player,
            difficulty,
            seed,
        } => {
            println!("Connecting to TCP server at {}...", connect);
            let mut rng = make_rng(seed);
            let transport = Box::new(TcpTransport::connect(&connect).await?);
            println!("Connected successfully!");

            let mut node = PlayerNode::new(make_player(player, difficulty), GameSession::new(), transport);
            match node.run(&mut rng, false).await {
                Ok(()) => report(&node),
                Err(e) => eprintln!("Game ended with an error: {}", e),
            }
        }
    }
    Ok(())
}

/// Both players share one session; each proposes moves for its own side.
#[cfg(feature = "std")]
fn run_local(mut players: [Box<dyn Player>; 2], rng: &mut SmallRng) -> anyhow::Result<()> {
    let mut session = GameSession::new();
    session.subscribe(|event| {
        if let GameEvent::GameOver { winner, reason } = event {
            println!("\n*** {} player wins: {} ***", winner, reason);
        }
    });

    while session.phase() == Phase::Playing {
        let snapshot = session.snapshot();
        let token = snapshot.turn_token();
        let side = snapshot.current;
        let player = &mut players[side.index()];
        let Some(mv) = player.select_move(rng, &snapshot) else {
            println!("{} player resigns.", side);
            return Ok(());
        };
        match session.commit_if_current(token, mv) {
            Ok(outcome) => {
                player.handle_move_result(mv, &outcome);
                players[side.opponent().index()].handle_opponent_move(mv, &outcome);
            }
            Err(e) => player.handle_rejected_move(mv, e),
        }
    }
    print_game(&session.snapshot());
    Ok(())
}

#[cfg(feature = "std")]
fn report(node: &PlayerNode) {
    print_game(&node.session().snapshot());
    match node.winner() {
        Some((winner, reason)) if winner == node.side() => {
            println!("\nVICTORY! You win: {}", reason)
        }
        Some((_, reason)) => println!("\nDEFEAT. Opponent wins: {}", reason),
        None => println!("\nGame stopped without a winner."),
    }
}
