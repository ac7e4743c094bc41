use animal_chess::{transport::in_memory::InMemoryTransport, AiPlayer, Difficulty, GameSession, PlayerNode, Side, WinReason};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const DEFAULT_MAX_PLIES: usize = 400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        eprintln!("Usage: {} <seed1> <seed2> [difficulty] [max_plies]", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let difficulty: Difficulty = match args.get(3) {
        Some(s) => s.parse().map_err(|e: &str| anyhow::anyhow!(e))?,
        None => Difficulty::Easy,
    };
    let max_plies: usize = match args.get(4) {
        Some(s) => s.parse()?,
        None => DEFAULT_MAX_PLIES,
    };

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let (t1, t2) = InMemoryTransport::pair();

    let f1 = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new(difficulty)), GameSession::new(), Box::new(t1))
            .with_max_plies(max_plies);
        node.run(&mut rng1, true).await?;
        Ok::<(Option<(Side, WinReason)>, usize), anyhow::Error>((node.winner(), node.ply_count()))
    };

    let f2 = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new(difficulty)), GameSession::new(), Box::new(t2))
            .with_max_plies(max_plies);
        node.run(&mut rng2, false).await?;
        Ok::<(Option<(Side, WinReason)>, usize), anyhow::Error>((node.winner(), node.ply_count()))
    };

    let (res1, res2) = tokio::try_join!(f1, f2)?;
    if res1 != res2 {
        anyhow::bail!("peers disagree on the result: {:?} vs {:?}", res1, res2);
    }

    let (winner, plies) = res1;
    let result = json!({
        "winner": winner.map(|(side, _)| side.to_string()),
        "reason": winner.map(|(_, reason)| reason.to_string()),
        "plies": plies,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
