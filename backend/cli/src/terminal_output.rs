//! Terminal output utilities: ANSI formatting and gallery listing.

use instafeed_gallery::{Favorites, GalleryView};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";

const CAPTION_WIDTH: usize = 60;

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn paint(text: &str, style: &str) -> String {
    if supports_color() {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Shorten `s` to at most `max` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    let first_line = s.lines().next().unwrap_or("").trim_end();
    if first_line.chars().count() <= max && first_line.len() == s.trim_end().len() {
        return first_line.to_string();
    }
    let kept: String = first_line.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Print the gallery the way the grid would show it: one line per item.
pub fn print_view(view: &GalleryView, favorites: &Favorites) {
    match view {
        GalleryView::Loading => println!("{}", paint("Loading...", DIM)),
        GalleryView::Error(message) => println!("{}", paint(message, RED)),
        GalleryView::Grid { media, profile } => {
            if let Some(profile) = profile {
                let count = profile
                    .media_count
                    .map(|n| format!(" · {n} posts"))
                    .unwrap_or_default();
                println!("{}{count}", paint(&format!("@{}", profile.username), BOLD));
                if let Some(bio) = profile.biography.as_deref().filter(|b| !b.is_empty()) {
                    println!("{}", paint(&truncate(bio, CAPTION_WIDTH), DIM));
                }
                println!();
            }

            if media.is_empty() {
                println!("{}", paint("No media", DIM));
            }
            for item in media {
                let star = if favorites.contains(&item.id) {
                    paint("★", YELLOW)
                } else {
                    " ".to_string()
                };
                let caption = truncate(item.alt_text(), CAPTION_WIDTH);
                let url = item.display_url().unwrap_or("(no image)");
                println!("{star} {:<20} {caption}", item.id);
                println!("  {}", paint(url, DIM));
            }
        }
    }
}
