//! Path: native/game_simulation/src/main.rs
//! Summary: ヘッドレス実行バイナリ（描画なしで 1 ランを自動操作し、結果を JSON で出力）
//!
//! `SURVIVOR_TABLES` にテーブル JSON のパスがあればそれを読み込む。ログは `RUST_LOG` で制御。

use std::sync::Arc;

use game_simulation::{FrameEvent, Game, GamePhase, GameTables, InputState, MemoryStore, SimpleRng};

const FRAME_DT: f32 = 1.0 / 60.0;
/// 操作を打ち切るシミュレーション時間（秒）
const MAX_RUN_TIME: f32 = 600.0;

fn load_tables() -> Result<GameTables, Box<dyn std::error::Error>> {
    match std::env::var("SURVIVOR_TABLES") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("loading tables from {}", path);
            Ok(GameTables::from_json(&json)?)
        }
        Err(_) => Ok(GameTables::default()),
    }
}

/// 円を描くように逃げ回り、時々ダッシュする
fn scripted_input(t: f32, frame: u64) -> InputState {
    let angle = t * 0.6;
    InputState {
        move_x: angle.cos(),
        move_y: angle.sin(),
        dash:   frame % 240 == 0,
        pause:  false,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_default_env().try_init();

    let tables = Arc::new(load_tables()?);
    let mut game = Game::new(tables, Box::new(MemoryStore::new()), SimpleRng::from_clock());
    game.start_run("default")?;

    let mut frame: u64 = 0;
    let mut bosses = 0u32;
    while game.run().elapsed < MAX_RUN_TIME {
        match game.phase() {
            GamePhase::LevelUp => {
                let choice = game.choose_upgrade(0)?;
                log::debug!("picked {:?}", choice);
                continue;
            }
            GamePhase::GameOver => break,
            _ => {}
        }
        let input = scripted_input(game.run().elapsed, frame);
        for event in game.update(FRAME_DT, &input) {
            match event {
                FrameEvent::BossDefeated { .. } => bosses += 1,
                FrameEvent::WaveWarning { message } => log::info!("{}", message),
                _ => {}
            }
        }
        frame += 1;
    }

    let hud = game.hud();
    log::info!(
        "headless run finished: {:.1}s level {} kills {} bosses {}",
        hud.time,
        hud.level,
        hud.kills,
        bosses
    );
    println!("{}", serde_json::to_string_pretty(&hud)?);
    if let Some(report) = game.last_report() {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}
