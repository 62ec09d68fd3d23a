use clap::Parser;
use klotski::{Board, RandomWalk};

/// Top-left cell the main block has to reach.
const EXIT: (u8, u8) = (3, 1);

fn is_solved(board: &Board) -> bool {
    let main = board.main_tile();
    (main.row(), main.col()) == EXIT
}

fn parse_move(text: &str) -> Result<(u8, &str), String> {
    let (id, direction) = text
        .split_once(':')
        .ok_or_else(|| format!("expected ID:DIRECTION, got {:?}", text))?;
    let id = id
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid tile id {:?}: {}", id, e))?;
    Ok((id, direction.trim()))
}

#[derive(Parser)]
#[command(name = "klotski")]
#[command(about = "Random walks on the Klotski sliding-block puzzle", long_about = None)]
struct Args {
    /// Number of random moves to play
    #[arg(short = 'n', long, default_value = "100")]
    steps: usize,

    /// Seed for the random move selector
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Moves to apply before the walk, as ID:DIRECTION (e.g. 9:south)
    #[arg(long, num_args = 1..)]
    apply: Vec<String>,

    /// Print the board after every move
    #[arg(short, long)]
    print_board: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut board = match Board::new() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error creating board: {}", e);
            std::process::exit(1);
        }
    };

    for text in &args.apply {
        let result = parse_move(text)
            .and_then(|(id, direction)| {
                board
                    .move_block_named(id, direction)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            eprintln!("Error applying move {}: {}", text, e);
            std::process::exit(1);
        }
    }

    println!("Starting position:\n{}", board);

    let mut walk = RandomWalk::new(args.seed);
    while walk.steps_taken() < args.steps && !is_solved(&board) {
        let chosen = match walk.step(&mut board) {
            Ok(chosen) => chosen,
            Err(e) => {
                eprintln!("Error after {} moves: {}", walk.steps_taken(), e);
                std::process::exit(1);
            }
        };
        if args.print_board {
            println!(
                "Move {} ({}/{}):\n{}",
                chosen,
                walk.steps_taken(),
                args.steps,
                board
            );
        }
    }

    let solved_char = if is_solved(&board) { 'Y' } else { 'N' };
    println!(
        "seed: {:<6}  steps: {:<6}  solved: {}",
        args.seed,
        walk.steps_taken(),
        solved_char
    );
    if !args.print_board {
        println!("\nFinal position:\n{}", board);
    }
}
