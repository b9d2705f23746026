//! 端末向け SearchView
//!
//! ドロップダウンは番号付きの一覧、読み込み表示はスピナー、
//! アラートは標準エラーに出す。

use std::io::Write;
use std::time::Duration;

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use school_search_common::view::NO_RESULTS_TEXT;
use school_search_common::{DetailView, Endpoints, SearchView, SuggestionRow};

use crate::error::{Result, SchoolSearchError};

pub struct TerminalView<W: Write> {
    out: W,
    endpoints: Endpoints,
    spinner: Option<ProgressBar>,
    query: String,
    rows: Vec<SuggestionRow>,
    alerts: Vec<String>,
    detail: Option<DetailView>,
    map_shown: bool,
    /// 最初に起きた書き込みエラー
    write_error: Option<std::io::Error>,
}

impl<W: Write> TerminalView<W> {
    /// `endpoints` は通学区域リンクを絶対URLにするために使う
    pub fn new(out: W, endpoints: Endpoints) -> Self {
        Self {
            out,
            endpoints,
            spinner: None,
            query: String::new(),
            rows: Vec::new(),
            alerts: Vec::new(),
            detail: None,
            map_shown: false,
            write_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 表示中の候補
    pub fn rows(&self) -> &[SuggestionRow] {
        &self.rows
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn map_shown(&self) -> bool {
        self.map_shown
    }

    pub fn is_loading(&self) -> bool {
        self.spinner.is_some()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 任意の行を出力（スピナー表示中は一時的に隠す）
    ///
    /// 書き込みエラーは `check_output` で報告する。
    pub fn print_line(&mut self, line: &str) {
        let out = &mut self.out;
        let written = match &self.spinner {
            Some(spinner) => spinner.suspend(|| writeln!(out, "{}", line)),
            None => writeln!(out, "{}", line),
        };
        if let Err(e) = written {
            self.write_error.get_or_insert(e);
        }
    }

    /// 出力をフラッシュし、途中の書き込みエラーがあれば返す
    pub fn check_output(&mut self) -> Result<()> {
        if let Some(e) = self.write_error.take() {
            return Err(e.into());
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_detail(&mut self, detail: &DetailView) {
        let mut lines = vec![
            String::new(),
            format!("{} [{}] [{}]", detail.name, detail.type_badge, detail.sector.text),
            format!("  Year Levels: {}", detail.year_levels),
            format!("  School Type: {}", detail.type_label),
        ];

        let optional = [
            ("Website", &detail.website),
            ("School Profile", &detail.profile_url),
            ("NAPLAN", &detail.naplan_url),
            ("ICSEA Score", &detail.icsea),
            ("ICSEA Percentile", &detail.icsea_percentile),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                lines.push(format!("  {}: {}", label, value));
            }
        }

        if let Some(link) = &detail.catchment_link {
            lines.push(format!("  Catchment Zone: {}", self.endpoints.resolve(link)));
        }

        for line in lines {
            self.print_line(&line);
        }
    }
}

impl<W: Write> SearchView for TerminalView<W> {
    fn set_query_text(&mut self, text: &str) {
        self.query = text.to_string();
    }

    fn show_suggestions(&mut self, rows: &[SuggestionRow]) {
        self.rows = rows.to_vec();
        for (i, row) in rows.iter().enumerate() {
            let line = if row.detail.is_empty() {
                format!("{:>3}. {}", i + 1, row.name)
            } else {
                format!("{:>3}. {} ({})", i + 1, row.name, row.detail)
            };
            self.print_line(&line);
        }
    }

    fn show_no_results(&mut self) {
        self.rows.clear();
        self.print_line(NO_RESULTS_TEXT);
    }

    fn hide_suggestions(&mut self) {}

    fn clear_suggestions(&mut self) {
        self.rows.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("⚠ {}", message)),
            None => eprintln!("⚠ {}", message),
        }
    }

    fn show_loading(&mut self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("学校情報を読み込み中...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
        self.detail = None;
        self.map_shown = false;
    }

    fn hide_loading(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.write_detail(detail);
        self.detail = Some(detail.clone());
    }

    fn show_map(&mut self) {
        self.map_shown = true;
    }

    fn scroll_to_map(&mut self) {}
}

/// 候補番号の入力を解釈する（1始まり）
///
/// 空入力と `q` は中断。
pub fn parse_pick(input: &str, count: usize) -> Result<usize> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return Err(SchoolSearchError::Aborted);
    }

    let index: usize = input
        .parse()
        .map_err(|_| SchoolSearchError::PickOutOfRange { index: 0, count })?;
    check_pick(index, count)
}

/// 候補番号が範囲内か（1始まり）
pub fn check_pick(index: usize, count: usize) -> Result<usize> {
    if index == 0 || index > count {
        return Err(SchoolSearchError::PickOutOfRange { index, count });
    }
    Ok(index)
}

/// 候補番号を対話入力
pub fn prompt_pick(count: usize) -> Result<usize> {
    let input: String = Input::new()
        .with_prompt(format!("番号を選択 (1-{}, q:中断)", count))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SchoolSearchError::Io(std::io::Error::other(e.to_string())))?;

    parse_pick(&input, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 常に書き込みに失敗する出力先
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let mut view = TerminalView::new(BrokenPipe, Endpoints::same_origin());
        view.print_line("first");
        view.print_line("second");

        let err = view.check_output().unwrap_err();
        assert!(
            matches!(err, SchoolSearchError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe)
        );
        assert!(view.check_output().is_ok());
    }

    #[test]
    fn test_check_output_ok() {
        let mut view = TerminalView::new(Vec::new(), Endpoints::same_origin());
        view.print_line("Sydney Boys High School");
        assert!(view.check_output().is_ok());
        assert_eq!(view.into_inner(), b"Sydney Boys High School\n".to_vec());
    }

    #[test]
    fn test_parse_pick() {
        assert_eq!(parse_pick("2", 3).unwrap(), 2);
        assert_eq!(parse_pick(" 1 ", 1).unwrap(), 1);
        assert!(matches!(parse_pick("", 3), Err(SchoolSearchError::Aborted)));
        assert!(matches!(parse_pick("Q", 3), Err(SchoolSearchError::Aborted)));
        assert!(matches!(
            parse_pick("4", 3),
            Err(SchoolSearchError::PickOutOfRange { index: 4, count: 3 })
        ));
        assert!(matches!(
            parse_pick("abc", 3),
            Err(SchoolSearchError::PickOutOfRange { .. })
        ));
        assert!(parse_pick("0", 3).is_err());
    }
}
