// src/prompt.rs
// =============================================================================
// Interactive questions asked when the command line leaves things out.
//
// The console side goes through dialoguer. What counts as an answer is
// decided by the small helpers below, which are what the tests cover.
// =============================================================================

use dialoguer::Input;

// Asks whether images should be downloaded
//
// Only "yes" (any case, surrounding spaces ignored) counts as yes.
pub fn ask_include_images() -> dialoguer::Result<bool> {
    let answer: String = Input::new()
        .with_prompt("Do you want to include images? (yes/no)")
        .allow_empty(true)
        .interact_text()?;

    Ok(is_yes(&answer))
}

// Reads page titles, one per prompt, until an empty answer
pub fn read_page_titles() -> dialoguer::Result<Vec<String>> {
    println!("Enter Wikipedia page names one per line. Press Enter on an empty line to finish.");

    let mut titles = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt("Enter page name")
            .allow_empty(true)
            .interact_text()?;

        match page_title(&line) {
            Some(title) => titles.push(title),
            None => break,
        }
    }

    Ok(titles)
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

// A trimmed title, or None for the empty line that ends the list
fn page_title(line: &str) -> Option<String> {
    let title = line.trim();
    (!title.is_empty()).then(|| title.to_string())
}
