//! Footer rows: notification or stats on top, key help underneath.

use crate::stats::StatsSnapshot;
use crate::width::center_stripped;

pub const HELP_TEXT: &str = "Keys [1-6]: Swap with Top | q/Ctrl+C: Quit";

const NOTICE_STYLE: &str = "\x1b[1;33m";
const HELP_STYLE: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// An active notification replaces the stats line until it expires.
pub fn footer_lines(width: u16, notification: Option<&str>, stats: &StatsSnapshot) -> Vec<String> {
    let width = width as usize;
    let status = match notification {
        Some(message) => center_stripped(&format!("{NOTICE_STYLE}{message}{RESET}"), width),
        None => center_stripped(&stats.status_line(), width),
    };
    let help = center_stripped(&format!("{HELP_STYLE}{HELP_TEXT}{RESET}"), width);
    vec![status, help]
}
