const PLAYER_PHOTO_BASE: &str =
    "https://resources.premierleague.com/premierleague/photos/players/110x140";

/// Pull a manager entry id out of user input.
///
/// Accepts a bare id ("12345") or any URL containing `entry/<digits>`, e.g.
/// `https://fantasy.premierleague.com/entry/12345/event/7`. Returns None for
/// anything else; callers report that as invalid input without touching the
/// network.
pub fn extract_identifier(input: &str) -> Option<String> {
    let input = input.trim();
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return Some(input.to_string());
    }

    input.match_indices("entry/").find_map(|(idx, marker)| {
        let digits: String = input[idx + marker.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    })
}

/// Photo URL for a player's `code`. Existence is not checked.
pub fn player_image_url(code: u32) -> String {
    format!("{PLAYER_PHOTO_BASE}/p{code}.png")
}
