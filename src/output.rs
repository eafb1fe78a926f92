//! CLI output formatting.
//!
//! Information-first display: entities lead with their semantic identity
//! (category, item label), with file details as indented context. Each
//! command has a `format_*` function returning `Vec<String>` — pure, no
//! I/O — and a `print_*` wrapper that writes to stdout.
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 Bothead (3 items)
//!     ANIMATED3.gif (image, 04-26-2022)
//!     Bothead.mp4 (video, 07-12-2022)
//!
//! 3 items in 1 category
//! ```

use crate::types::{GalleryItem, MediaType};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn type_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Image => "image",
        MediaType::Video => "video",
    }
}

/// Format the scan listing: categories in order, items beneath them.
pub fn format_scan_output(items: &[GalleryItem]) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];

    let mut categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
    categories.dedup();

    for (pos, category) in categories.iter().enumerate() {
        let in_category: Vec<&GalleryItem> =
            items.iter().filter(|i| i.category == *category).collect();
        lines.push(format!(
            "{} {} ({} item{})",
            format_index(pos + 1),
            category,
            in_category.len(),
            if in_category.len() == 1 { "" } else { "s" },
        ));
        for item in in_category {
            let detail = match item.date_modified.as_deref() {
                Some(date) => format!("{}, {}", type_label(item.media_type), date),
                None => type_label(item.media_type).to_string(),
            };
            lines.push(format!("    {} ({})", item.file_name(), detail));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} item{} in {} categor{}",
        items.len(),
        if items.len() == 1 { "" } else { "s" },
        categories.len(),
        if categories.len() == 1 { "y" } else { "ies" },
    ));
    lines
}

pub fn print_scan_output(items: &[GalleryItem]) {
    for line in format_scan_output(items) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;

    #[test]
    fn scan_output_groups_by_category() {
        let mut a = item("Bothead", "OG.png");
        a.date_modified = Some("04-25-2022".into());
        let b = item("Thunk", "Verbs-Animated.mp4");
        let lines = format_scan_output(&[a, b]);

        assert_eq!(lines[0], "Categories");
        assert_eq!(lines[1], "001 Bothead (1 item)");
        assert_eq!(lines[2], "    OG.png (image, 04-25-2022)");
        assert_eq!(lines[3], "002 Thunk (1 item)");
        assert_eq!(lines[4], "    Verbs-Animated.mp4 (video)");
        assert_eq!(lines.last().unwrap(), "2 items in 2 categories");
    }

    #[test]
    fn empty_scan_reports_zero() {
        let lines = format_scan_output(&[]);
        assert_eq!(lines.last().unwrap(), "0 items in 0 categories");
    }
}
