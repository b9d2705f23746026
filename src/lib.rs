//! Australia School Search - 端末クライアント
//!
//! 検索の流れ（候補 → 選択 → 詳細 → 地図）は共通ライブラリの
//! `SearchSession` が持ち、ここでは通信と端末への出力を受け持つ。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod terminal;
pub mod text_map;
