//! Single-pass logical deduction for Minesweeper boards.
//!
//! Given what a player can see (covered, flagged, and revealed cells), a
//! pass proves cells safe or hazardous without guessing and returns the
//! moves in a reproducible order. The board owner applies them and calls
//! again for more.
//!
//! Exports high-level functions callable from JavaScript via wasm-bindgen.
//! All grid data is passed as flat `Int8Array` / `Uint8Array` in column-major
//! layout: `cells[x * height + y]` maps to JS `grid[x][y]`.

pub mod autoplay;
pub mod board;
pub mod collector;
pub mod config;
pub mod deduce;
pub mod error;
pub mod group;
pub mod overlap;
pub mod rng;
pub mod types;

pub use crate::autoplay::{is_solvable, AutoplayReport};
pub use crate::board::{Board, Reveal};
pub use crate::config::{AutoplayConfig, BoardConfig};
pub use crate::deduce::{deduce, hint};
pub use crate::error::{BoardError, SnapshotError};
pub use crate::types::{Action, CellState, Count, Move, Position, Snapshot};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use crate::board::{self, Board};
    use crate::config::BoardConfig;
    use crate::rng::BoardRng;
    use crate::types::{Position, Snapshot};
    use crate::{autoplay, deduce};
    use wasm_bindgen::prelude::*;

    fn set(obj: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsError> {
        js_sys::Reflect::set(obj, &key.into(), value)
            .map(|_| ())
            .map_err(|_| JsError::new(&format!("failed to set `{}`", key)))
    }

    /// Run one deduction pass.
    /// Returns `[{ pos: { x, y }, action: "flag" | "uncover" }, ...]`.
    #[wasm_bindgen(js_name = "deduceMoves")]
    pub fn wasm_deduce_moves(width: usize, height: usize, cells: &[i8]) -> Result<JsValue, JsError> {
        let snapshot = Snapshot::from_codes(width, height, cells)?;
        let moves = deduce::deduce(&snapshot);
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// First provably safe cell. Returns `{ x, y }` or `null`.
    #[wasm_bindgen(js_name = "getHint")]
    pub fn wasm_get_hint(width: usize, height: usize, cells: &[i8]) -> Result<JsValue, JsError> {
        let snapshot = Snapshot::from_codes(width, height, cells)?;
        match deduce::hint(&snapshot) {
            Some(pos) => Ok(serde_wasm_bindgen::to_value(&pos)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Generate a board that can be cleared without guessing.
    /// `config` is a `BoardConfig`-shaped object; missing fields take defaults.
    /// Returns `{ success, attempts, hazards: Uint8Array, visible: Int8Array }`,
    /// where `visible` shows the board right after opening the start area.
    #[wasm_bindgen(js_name = "generateSolvableBoard")]
    pub fn wasm_generate_solvable_board(config: JsValue, max_attempts: u32) -> Result<JsValue, JsError> {
        let mut config: BoardConfig = if config.is_undefined() || config.is_null() {
            BoardConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let start = config
            .start
            .unwrap_or(Position::new(config.width / 2, config.height / 2));
        config.start = Some(start);

        let mut rng = BoardRng::new(config.seed);
        let result = board::generate_solvable_board(&config, max_attempts, &mut rng, |b: &Board| {
            autoplay::is_solvable(b, start)
        })?;

        let mut opened = result.board.clone();
        for x in start.x.saturating_sub(1)..=start.x + 1 {
            for y in start.y.saturating_sub(1)..=start.y + 1 {
                opened.uncover(Position::new(x, y));
            }
        }

        let obj = js_sys::Object::new();
        set(&obj, "success", &result.success.into())?;
        set(&obj, "attempts", &result.attempts.into())?;

        let hazards = result.board.hazards().as_bytes();
        let hazards_arr = js_sys::Uint8Array::new_with_length(hazards.len() as u32);
        hazards_arr.copy_from(hazards);
        set(&obj, "hazards", &hazards_arr.into())?;

        let visible = opened.snapshot().to_codes();
        let visible_arr = js_sys::Int8Array::new_with_length(visible.len() as u32);
        visible_arr.copy_from(&visible);
        set(&obj, "visible", &visible_arr.into())?;

        Ok(obj.into())
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM deduction engine ready".to_string()
    }
}
