use std::path::Path;

use hatch::application::CleanResult;

use crate::ui::blocks::summary::ResultSummary;

pub fn render_clean_result(
    result: &CleanResult,
    root: &Path,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = match (dry_run, result.is_noop()) {
        (_, true) => "Nothing to Clean",
        (true, false) => "Clean Preview",
        (false, false) => "Clean Complete",
    };
    let label = if dry_run { "Would remove" } else { "Removed" };

    let mut summary = ResultSummary::success(title);
    for dir in &result.removed {
        summary.add_row(label, dir.strip_prefix(root).unwrap_or(dir).display());
    }
    if dry_run && !result.is_noop() {
        summary.with_next_step("run again without --dry-run to delete");
    }
    summary.render(supports_color, supports_unicode)
}
