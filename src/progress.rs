// src/progress.rs
// =============================================================================
// Console progress bars.
//
// One MultiProgress per run holds the page bar and, while a page is being
// exported, that page's image bar underneath it. With --quiet the whole
// group draws to a hidden target, so callers never need to check.
// =============================================================================

use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

// The bar group for a run
pub fn bar_group(visible: bool) -> MultiProgress {
    if visible {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

// Adds a counting bar to `bars`
//
// Example: counter(&bars, 12, "images") draws
//   ⠁ [=========>------------------------------] 3/12 images Dog.jpg
pub fn counter(bars: &MultiProgress, len: usize, noun: &str) -> Result<ProgressBar> {
    let template = format!("{{spinner}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} {{msg}}", noun);
    let bar = bars.add(ProgressBar::new(len as u64));
    bar.set_style(ProgressStyle::with_template(&template)?.progress_chars("=>-"));
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_tracks_position() {
        let bars = bar_group(false);
        let bar = counter(&bars, 3, "images").unwrap();
        bar.inc(1);
        bar.inc(1);

        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.position(), 2);
    }
}
