// src/search/gist_url.rs
// =============================================================================
// Builds the URL reported for a matching gist.
//
// The last path segment of the gist's html_url is the gist id. The segment
// before it, if there is one, is the owner and gets replaced by the
// searched username:
//
//   https://gist.github.com/abc123        + bob -> https://gist.github.com/bob/abc123
//   https://gist.github.com/alice/abc123  + bob -> https://gist.github.com/bob/abc123
// =============================================================================

use url::{Position, Url};

/// Per-user URL of a gist, or `None` when `html_url` has no id segment.
pub fn match_url(html_url: &str, username: &str) -> Option<String> {
    match Url::parse(html_url) {
        Ok(url) => from_parsed(&url, username),
        Err(_) => {
            // Not an absolute URL: split on the last '/' and splice the user in
            let (base, gist_id) = html_url.rsplit_once('/')?;
            if gist_id.is_empty() {
                return None;
            }
            Some(format!("{}/{}/{}", base, username, gist_id))
        }
    }
}

fn from_parsed(url: &Url, username: &str) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let (gist_id, rest) = segments.split_last()?;

    // Drop the owner segment when the URL has one
    let leading = match rest.split_last() {
        Some((_owner, leading)) => leading,
        None => rest,
    };

    // scheme://host[:port] without any path
    let mut rebuilt = url[..Position::BeforePath].to_string();
    for segment in leading {
        rebuilt.push('/');
        rebuilt.push_str(segment);
    }
    rebuilt.push('/');
    rebuilt.push_str(username);
    rebuilt.push('/');
    rebuilt.push_str(gist_id);

    Some(rebuilt)
}
