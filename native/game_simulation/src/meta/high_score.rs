//! Path: native/game_simulation/src/meta/high_score.rs
//! Summary: ハイスコア表（合成スコア降順・上位 10 件）

use serde::{Deserialize, Serialize};

pub const MAX_HIGH_SCORES: usize = 10;
/// この順位以内なら「新記録」扱い
pub const NEW_HIGH_SCORE_RANK: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score:     u32,
    pub time:      f32,
    pub level:     u32,
    pub kills:     u32,
    pub character: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// 記録を挿入し 1 始まりの順位を返す。圏外なら `None`。
    /// 同点は先に記録された方が上
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self.entries.iter().position(|e| entry.score > e.score).unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }
}
