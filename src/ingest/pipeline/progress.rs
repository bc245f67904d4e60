use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const BOUNDED_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}";
const UNBOUNDED_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.cyan} {pos:>7} {msg}";

/// A bar when the number of articles is known, a spinner otherwise.
pub(crate) fn new_progress_bar(multibar: &MultiProgress, limit: u64) -> ProgressBar {
    let (bar, template) = if limit == 0 {
        (ProgressBar::new_spinner(), UNBOUNDED_TEMPLATE)
    } else {
        (ProgressBar::new(limit), BOUNDED_TEMPLATE)
    };
    let style = ProgressStyle::with_template(template).unwrap_or_else(|e| {
        log::warn!("Falling back to the default progress style: {e}");
        ProgressStyle::default_bar()
    });

    let bar = multibar.add(bar);
    bar.set_style(style);
    bar
}
