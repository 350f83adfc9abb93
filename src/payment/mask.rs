/// Keep only the last four characters of a card-like value for logging.
pub fn pan(card: &str) -> String {
    let len = card.chars().count();
    if len > 4 {
        let tail: String = card.chars().skip(len - 4).collect();
        "*".repeat(len - 4) + &tail
    } else {
        card.to_string()
    }
}
