// CLI層 - コマンドライン引数の定義とデモコマンド
// 引数をパイプライン設定に変換して実行する

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
