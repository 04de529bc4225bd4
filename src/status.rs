//! Workflow status to header color resolution.

/// Resolve a semantic workflow status to a header color template.
///
/// Total over any input; unrecognized statuses fall back to `blue`.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "running" | "pending" => "wathet",
        "success" | "completed" => "green",
        "failed" | "error" => "red",
        "warning" => "orange",
        "info" => "blue",
        _ => "blue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_statuses() {
        let cases = [
            ("running", "wathet"),
            ("pending", "wathet"),
            ("success", "green"),
            ("completed", "green"),
            ("failed", "red"),
            ("error", "red"),
            ("warning", "orange"),
            ("info", "blue"),
        ];
        for (status, color) in cases {
            assert_eq!(status_color(status), color, "status {status}");
        }
    }

    #[test]
    fn unknown_status_falls_back() {
        assert_eq!(status_color("exploded"), "blue");
        assert_eq!(status_color(""), "blue");
    }
}
