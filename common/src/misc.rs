/// Rewrites a root-relative path (`/images/...`) into an absolute URL under `base`.
/// Anything else is returned untouched.
pub fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), path)
    } else {
        path.to_string()
    }
}

/// Prices are stored as integer cents and rendered as decimal numbers.
pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_root_relative_paths() {
        assert_eq!(
            absolute_url("http://127.0.0.1:5000", "/images/indoor/pothos.jpg"),
            "http://127.0.0.1:5000/images/indoor/pothos.jpg"
        );
        assert_eq!(
            absolute_url("https://shop.example/", "/images/a.jpg"),
            "https://shop.example/images/a.jpg"
        );
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(
            absolute_url("http://127.0.0.1:5000", "https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
        assert_eq!(absolute_url("http://127.0.0.1:5000", ""), "");
    }

    #[test]
    fn converts_cents() {
        assert_eq!(cents_to_price(1397), 13.97);
        assert_eq!(cents_to_price(0), 0.0);
    }
}
