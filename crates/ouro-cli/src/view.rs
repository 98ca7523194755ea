use std::{
    io::{self, Write as _},
    thread,
    time::Duration,
};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ouro_engine::{
    EpisodeOutcome, FeedForwardNet, GRID_HEIGHT, GRID_WIDTH, GameSeed, GameState, Pos, SnakeGame,
};

const FRAME_DELAY: Duration = Duration::from_millis(50);
const FINAL_FRAME_DELAY: Duration = Duration::from_millis(600);

/// Replays one episode in the terminal, frame by frame.
///
/// Runs on the alternate screen and restores the terminal afterwards, also
/// when drawing fails mid-episode. Returns the replayed outcome.
pub fn show_episode(genes: &[f32], seed: GameSeed) -> anyhow::Result<EpisodeOutcome> {
    let net = FeedForwardNet::from_genes(genes);
    let mut game = SnakeGame::with_seed(seed);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let played = run_frames(&mut stdout, &mut game, &net);
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    played?;

    Ok(EpisodeOutcome {
        score: game.score(),
        steps: game.steps(),
        seed,
    })
}

fn run_frames(
    stdout: &mut io::Stdout,
    game: &mut SnakeGame,
    net: &FeedForwardNet,
) -> anyhow::Result<()> {
    draw_frame(stdout, game)?;
    while game.state().is_running() {
        let turn = net.decide(&game.sense());
        game.step(turn);
        draw_frame(stdout, game)?;
        thread::sleep(FRAME_DELAY);
    }
    thread::sleep(FINAL_FRAME_DELAY);
    Ok(())
}

fn draw_frame(stdout: &mut io::Stdout, game: &SnakeGame) -> anyhow::Result<()> {
    let head = game.head();
    let body: Vec<Pos> = game.snake().skip(1).collect();

    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let border: String = "#".repeat(usize::try_from(GRID_WIDTH).unwrap() + 2);
    queue!(stdout, Print(&border), cursor::MoveToNextLine(1))?;
    for y in 0..GRID_HEIGHT {
        let mut row = String::from("#");
        for x in 0..GRID_WIDTH {
            let pos = Pos { x, y };
            row.push(if pos == head {
                '@'
            } else if body.contains(&pos) {
                'o'
            } else if pos == game.food() {
                '*'
            } else {
                ' '
            });
        }
        row.push('#');
        queue!(stdout, Print(&row), cursor::MoveToNextLine(1))?;
    }
    queue!(stdout, Print(&border), cursor::MoveToNextLine(1))?;

    let status = match game.state() {
        GameState::Running => String::new(),
        GameState::Dead => "  [dead]".to_owned(),
        GameState::Won => "  [won]".to_owned(),
    };
    queue!(
        stdout,
        Print(format!(
            "score: {}, steps: {}{status}",
            game.score(),
            game.steps()
        )),
        cursor::MoveToNextLine(1)
    )?;

    stdout.flush()?;
    Ok(())
}
