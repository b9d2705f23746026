use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "school-search")]
#[command(about = "オーストラリアの学校検索（候補・学校詳細・5km圏）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 接続先（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 学校名の候補を表示
    Suggest {
        /// 学校名（3文字以上）
        #[arg(required = true)]
        query: String,

        /// 州で絞り込む (NSW/VIC/QLD/SA/WA/TAS/NT/ACT)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// 候補から学校を選んで詳細と5km圏を表示
    Search {
        /// 学校名（3文字以上）
        #[arg(required = true)]
        query: String,

        /// 州で絞り込む
        #[arg(short, long)]
        state: Option<String>,

        /// 候補番号を指定（1始まり、省略時は対話選択）
        #[arg(short, long)]
        pick: Option<usize>,

        /// 詳細をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ACARA IDを指定して詳細を表示
    Info {
        /// ACARA ID
        #[arg(required = true)]
        acara_id: String,

        /// 詳細をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を管理
    Config {
        /// 接続先を設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 州フィルタの既定値を設定
        #[arg(long)]
        set_state: Option<String>,

        /// 州フィルタの既定値を解除
        #[arg(long)]
        clear_state: bool,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
