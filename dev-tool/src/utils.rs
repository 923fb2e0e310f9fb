use indicatif::{ProgressBar, ProgressStyle};

pub(crate) fn progress_spin_until_done<R>(msg: &'static str, func: impl FnOnce() -> R) -> R {
    let progress_bar = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_bar().template("{msg}: {elapsed:>10} {spinner:.green}"));
    progress_bar.set_message(msg);
    progress_bar.enable_steady_tick(100);
    let res = func();
    progress_bar.finish();
    res
}

/// Creates a progress bar for `len` steps of the named task.
pub(crate) fn progress_bar(task: &str, len: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(len as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{}: [{{bar:27.green}}] {{percent:>3}}% ({{pos:>5}}/{{len:>5}}) {{elapsed_precise}}",
                task,
            ))
            .progress_chars("=> "),
    );
    progress_bar.tick();
    progress_bar
}
