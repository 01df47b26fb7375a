//! Path utilities: expand `~` in user-supplied paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/a.csv"), PathBuf::from("/tmp/a.csv"));
        assert_eq!(expand_tilde("rel/a.csv"), PathBuf::from("rel/a.csv"));
    }

    #[test]
    fn tilde_goes_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }
}
