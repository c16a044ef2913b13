//! オセロのコンソール対局のエントリポイント
//! 設定読み込み、ログ初期化、標準入力からの対局ループを行う。
//!
//! 入力: `row col` で人間の着手、`ai` でAIの着手、`quit` で終了。

use std::io::{self, BufRead, Write};

use othello::{
    config::Config,
    game::{Board, BoardView, GameObserver, GameResult, Side},
    session::GameSession,
};
use tracing_subscriber::EnvFilter;

/// 標準出力に盤面を表示するオブザーバー
struct ConsoleDisplay {
    dump_board: bool,
}

impl GameObserver for ConsoleDisplay {
    fn on_board_changed(&mut self, board: &Board) {
        if self.dump_board {
            println!("{}", board.display());
        }
    }

    fn on_invalid_move(&mut self, row: usize, col: usize, side: Side) {
        println!("Invalid move! {:?} cannot play {} {}", side, row, col);
    }

    fn on_pass(&mut self, side: Side) {
        println!("{:?} has no legal move and passes", side);
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        println!("{}", result);
    }
}

/// 1行の入力を解釈して実行する
/// 終了要求ならfalseを返す
fn handle_line(session: &mut GameSession<ConsoleDisplay>, line: &str) -> bool {
    let side = session.controller().side_to_move();
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let outcome = match tokens.as_slice() {
        ["quit"] | ["exit"] => return false,
        ["ai"] => session.request_ai_move(side),
        ["view"] => {
            // 手番側の席から見た盤面
            let view = BoardView::for_side(side);
            for row in view.render(session.board()) {
                let line: Vec<String> = row.iter().map(|cell| format!("{:?}", cell)).collect();
                println!("{}", line.join(" "));
            }
            return true;
        }
        [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
            (Ok(row), Ok(col)) => session.attempt_move(row, col, side),
            _ => {
                println!("Expected: row col | ai | view | quit");
                return true;
            }
        },
        [] => return true,
        _ => {
            println!("Expected: row col | ai | view | quit");
            return true;
        }
    };

    if let Err(e) = outcome {
        println!("{}", e);
    }

    !session.controller().is_ended()
}

fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        first = ?config.game.first_side,
        policy = ?config.game.no_move_policy,
        depth = config.search.max_depth,
        simulation = ?config.search.simulation,
        strategy = ?config.ai.strategy,
        "configuration loaded"
    );

    let display = ConsoleDisplay {
        dump_board: config.logging.dump_board,
    };
    let mut session = GameSession::from_config(&config, display);
    println!("{}", session.board().display());

    let stdin = io::stdin();
    loop {
        print!("{:?} to move> ", session.controller().side_to_move());
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if !handle_line(&mut session, line.trim()) {
                    break;
                }
            }
        }
    }
}
