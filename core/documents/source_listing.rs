use super::{display_path, fence_language, format_date, or_placeholder};
use crate::config::PaginationConfig;
use crate::context::ProjectContext;
use chrono::NaiveDate;
use log;

pub const PAGE_MARKER_PREFIX: &str = "<!-- 第 ";
const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>";

struct Paginator {
    out: String,
    page: usize,
    lines_on_page: usize,
    lines_per_page: usize,
    total_pages: usize,
}

impl Paginator {
    fn new(pagination: &PaginationConfig) -> Self {
        Self {
            out: String::new(),
            page: 1,
            lines_on_page: 0,
            lines_per_page: pagination.lines_per_page.max(1),
            total_pages: pagination.total_pages,
        }
    }

    fn exhausted(&self) -> bool {
        self.page > self.total_pages
    }

    fn open_block(&mut self, heading: &str, language: &str) {
        self.out.push_str(&format!("### {}\n\n```{}\n", heading, language));
    }

    fn close_block(&mut self) {
        self.out.push_str("```\n\n");
    }

    fn break_page(&mut self) {
        self.out.push_str(&format!(
            "{}\n{}{} 页 / 共 {} 页 -->\n\n",
            PAGE_BREAK, PAGE_MARKER_PREFIX, self.page, self.total_pages
        ));
        self.page += 1;
        self.lines_on_page = 0;
    }

    /// Emits one line and reports whether it filled the current page.
    fn push_line(&mut self, line: &str) -> bool {
        self.out.push_str(line);
        self.out.push('\n');
        self.lines_on_page += 1;
        self.lines_on_page >= self.lines_per_page
    }

    fn finish(mut self) -> String {
        if self.lines_on_page > 0 {
            self.break_page();
        }
        while !self.exhausted() {
            self.break_page();
        }
        self.out
    }
}

pub fn render(context: &ProjectContext, pagination: &PaginationConfig, date: NaiveDate) -> String {
    let meta = &context.metadata;
    let mut pager = Paginator::new(pagination);

    pager.out.push_str(&format!(
        "# {} 源代码\n\n- 软件名称：{}\n- 版本号：{}\n- 生成日期：{}\n- 每页行数：{}\n\n",
        or_placeholder(&meta.name),
        or_placeholder(&meta.name),
        or_placeholder(&meta.version),
        format_date(date),
        pager.lines_per_page,
    ));

    'files: for path in &context.code_files {
        if pager.exhausted() {
            log::debug!("Page budget exhausted, remaining files omitted.");
            break;
        }
        let shown = display_path(path);
        let content = match context.read_code_file(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not read {}: {}", shown, e);
                pager
                    .out
                    .push_str(&format!("### {}\n\n> 读取文件失败: {}\n\n", shown, e));
                continue;
            }
        };
        let lines: Vec<&str> = content.lines().collect();
        let language = fence_language(path);
        log::trace!("Emitting {} ({} lines) from page {}", shown, lines.len(), pager.page);

        pager.open_block(&format!("{} ({} 行)", shown, lines.len()), language);
        for (i, line) in lines.iter().enumerate() {
            if !pager.push_line(line) {
                continue;
            }
            pager.close_block();
            pager.break_page();
            if i + 1 == lines.len() {
                continue 'files;
            }
            if pager.exhausted() {
                break 'files;
            }
            pager.open_block(&format!("{} (续)", shown), language);
        }
        pager.close_block();
    }

    pager.finish()
}
