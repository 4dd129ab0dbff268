use crate::error::Result;
use crate::remote::RemoteClient;

/// List the caller's gists, one per line: id, `+` (public) or `-`
/// (private), then the description, elided to the terminal width.
pub fn list(client: &RemoteClient) -> Result<()> {
    let width = crossterm::terminal::size().ok().map(|(w, _)| w as usize);
    for gist in client.list() {
        let gist = gist?;
        let marker = if gist.public { '+' } else { '-' };
        let desc = gist.description.unwrap_or_default();
        let line = format!("{} {} {}", gist.id, marker, desc);
        println!("{}", elide(&line, width));
    }
    Ok(())
}

fn elide(line: &str, width: Option<usize>) -> String {
    if let Some(width) = width {
        if width > 3 && line.chars().count() > width {
            let cut: String = line.chars().take(width - 3).collect();
            return format!("{cut}...");
        }
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elide_long_line() {
        assert_eq!(elide("abcdefghij", Some(8)), "abcde...");
    }

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(elide("abc", Some(80)), "abc");
    }

    #[test]
    fn test_no_terminal_means_no_elision() {
        let long = "x".repeat(500);
        assert_eq!(elide(&long, None), long);
    }
}
